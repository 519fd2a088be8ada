use async_trait::async_trait;

use crate::domain::health::model::{MetricValue, QueryRequest};

/// Query capability every datasource backend exposes.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(&self, request: QueryRequest) -> anyhow::Result<Vec<MetricValue>>;
}
