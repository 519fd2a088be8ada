use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::query_executor::QueryExecutor;
use crate::domain::health::model::{MetricValue, QueryRequest};

/// Backend living in a separate process, reached over HTTP.
///
/// The `QueryRequest` is POSTed as JSON and the response body must be a JSON
/// array of values. Any non-2xx status is reported as a query error.
pub struct RemotePluginExecutor {
    client: Client,
    url: String,
}

impl RemotePluginExecutor {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl QueryExecutor for RemotePluginExecutor {
    async fn query(&self, request: QueryRequest) -> Result<Vec<MetricValue>> {
        let resp = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to call plugin (url={}): {}", self.url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("plugin returned {}: {} (url={})", status, text, self.url));
        }

        resp.json::<Vec<MetricValue>>()
            .await
            .map_err(|e| anyhow!("Failed to decode plugin response: {} (url={})", e, self.url))
    }
}
