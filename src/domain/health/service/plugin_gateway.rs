use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::core::logging::metric_logger::{messages, MetricLogger};
use crate::core::persistence::datasource::datasource_entity::DatasourceEntity;
use crate::core::persistence::datasource::datasource_repository_trait::DatasourceRepository;
use crate::core::plugin::plugin_registry::PluginRegistry;
use crate::core::plugin::query_executor::QueryExecutor;
use crate::domain::health::error::MetricError;
use crate::domain::health::model::{MetricValue, Period, QueryRequest};

/// Bridges a workspace's stored datasource to the backend that serves it.
pub struct PluginGateway {
    datasources: Arc<dyn DatasourceRepository>,
    registry: Arc<PluginRegistry>,
    logger: Arc<dyn MetricLogger>,
}

/// A datasource paired with its backend, valid for one request.
pub struct BoundPlugin {
    datasource: DatasourceEntity,
    executor: Arc<dyn QueryExecutor>,
    logger: Arc<dyn MetricLogger>,
}

impl PluginGateway {
    pub fn new(
        datasources: Arc<dyn DatasourceRepository>,
        registry: Arc<PluginRegistry>,
        logger: Arc<dyn MetricLogger>,
    ) -> Self {
        Self {
            datasources,
            registry,
            logger,
        }
    }

    /// Resolve the workspace datasource and locate its backend.
    pub async fn resolve(&self, workspace_id: Uuid) -> Result<BoundPlugin, MetricError> {
        let datasource = match self.datasources.find_health_by_workspace_id(workspace_id).await {
            Ok(Some(ds)) => ds,
            Ok(None) => {
                let err = MetricError::DatasourceNotFound(workspace_id);
                self.logger.error(
                    messages::QUERY_GET_PLUGIN_ERROR,
                    "resolve",
                    &err,
                    &json!({ "workspaceId": workspace_id }),
                );
                return Err(err);
            }
            Err(e) => {
                let err = MetricError::DatasourceLookup(e);
                self.logger.error(
                    messages::QUERY_GET_PLUGIN_ERROR,
                    "resolve",
                    &err,
                    &json!({ "workspaceId": workspace_id }),
                );
                return Err(err);
            }
        };

        let executor = match self.registry.get_plugin_by_src(&datasource.plugin_src) {
            Ok(executor) => executor,
            Err(err) => {
                self.logger.error(
                    messages::PLUGIN_NOT_FOUND_ERROR,
                    "resolve",
                    &err,
                    &json!({
                        "workspaceId": workspace_id,
                        "pluginSrc": datasource.plugin_src,
                        "registered": self.registry.plugin_sources(),
                    }),
                );
                return Err(err);
            }
        };

        Ok(BoundPlugin {
            datasource,
            executor,
            logger: self.logger.clone(),
        })
    }

    /// One-shot resolve and query.
    pub async fn execute(
        &self,
        workspace_id: Uuid,
        query: &str,
        range: &Period,
        interval: &Period,
    ) -> Result<Vec<MetricValue>, MetricError> {
        self.resolve(workspace_id)
            .await?
            .execute(query, range, interval)
            .await
    }
}

impl BoundPlugin {
    pub async fn execute(
        &self,
        query: &str,
        range: &Period,
        interval: &Period,
    ) -> Result<Vec<MetricValue>, MetricError> {
        let request = QueryRequest {
            datasource_configuration: self.datasource.data.clone(),
            query: query.to_string(),
            filters: Vec::new(),
            range_period: range.clone(),
            interval: interval.clone(),
        };

        self.executor.query(request).await.map_err(|e| {
            self.logger.error(
                messages::PLUGIN_QUERY_ERROR,
                "execute",
                &e,
                &json!({
                    "pluginSrc": self.datasource.plugin_src,
                    "query": query,
                    "range": range.to_string(),
                    "interval": interval.to_string(),
                }),
            );
            MetricError::Backend(e)
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Counts error records so tests can assert single logging.
    #[derive(Default)]
    pub(crate) struct RecordingLogger {
        pub errors: Mutex<Vec<(String, String)>>,
        pub infos: Mutex<Vec<String>>,
    }

    impl MetricLogger for RecordingLogger {
        fn info(&self, message: &str, _data: &serde_json::Value) {
            self.infos.lock().unwrap().push(message.to_string());
        }

        fn error(
            &self,
            message: &str,
            function_name: &str,
            _err: &dyn std::fmt::Display,
            _data: &serde_json::Value,
        ) {
            self.errors
                .lock()
                .unwrap()
                .push((message.to_string(), function_name.to_string()));
        }
    }

    #[derive(Default)]
    pub(crate) struct MockDatasourceRepository {
        pub datasources: Vec<DatasourceEntity>,
        pub fail: bool,
    }

    #[async_trait]
    impl DatasourceRepository for MockDatasourceRepository {
        async fn find_health_by_workspace_id(
            &self,
            workspace_id: Uuid,
        ) -> anyhow::Result<Option<DatasourceEntity>> {
            if self.fail {
                return Err(anyhow!("datasource store offline"));
            }
            Ok(self
                .datasources
                .iter()
                .find(|d| d.is_health_for(workspace_id))
                .cloned())
        }
    }

    /// Records every request and replies with a fixed result.
    pub(crate) struct MockExecutor {
        pub requests: Mutex<Vec<QueryRequest>>,
        pub response: Result<Vec<MetricValue>, String>,
    }

    impl MockExecutor {
        pub fn returning(values: Vec<MetricValue>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Ok(values),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl QueryExecutor for MockExecutor {
        async fn query(&self, request: QueryRequest) -> anyhow::Result<Vec<MetricValue>> {
            self.requests.lock().unwrap().push(request);
            self.response.clone().map_err(|m| anyhow!(m))
        }
    }

    pub(crate) fn datasource(workspace_id: Uuid, plugin_src: &str) -> DatasourceEntity {
        DatasourceEntity {
            id: Uuid::new_v4(),
            name: "health".into(),
            workspace_id,
            plugin_src: plugin_src.into(),
            data: json!({ "url": "http://prometheus:9090" }),
            health: true,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn gateway(
        repo: MockDatasourceRepository,
        executor: Arc<MockExecutor>,
        logger: Arc<RecordingLogger>,
    ) -> PluginGateway {
        let mut registry = PluginRegistry::new();
        registry.register("prometheus", executor);
        PluginGateway::new(Arc::new(repo), Arc::new(registry), logger)
    }

    #[tokio::test]
    async fn execute_builds_normalized_request() {
        let ws = Uuid::new_v4();
        let executor = Arc::new(MockExecutor::returning(vec![MetricValue(json!({ "ts": 100, "value": 5.0 }))]));
        let logger = Arc::new(RecordingLogger::default());
        let repo = MockDatasourceRepository {
            datasources: vec![datasource(ws, "prometheus")],
            fail: false,
        };

        let values = gateway(repo, executor.clone(), logger.clone())
            .execute(ws, "up", &Period::new(1, "h"), &Period::new(1, "m"))
            .await
            .unwrap();

        assert_eq!(values, vec![MetricValue(json!({ "ts": 100, "value": 5.0 }))]);
        let requests = executor.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "up");
        assert!(requests[0].filters.is_empty());
        assert_eq!(requests[0].datasource_configuration["url"], "http://prometheus:9090");
        assert_eq!(requests[0].range_period, Period::new(1, "h"));
        assert_eq!(requests[0].interval, Period::new(1, "m"));
        assert!(logger.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_datasource_is_logged_once() {
        let executor = Arc::new(MockExecutor::returning(vec![]));
        let logger = Arc::new(RecordingLogger::default());

        let err = gateway(MockDatasourceRepository::default(), executor.clone(), logger.clone())
            .execute(Uuid::new_v4(), "up", &Period::new(1, "h"), &Period::new(1, "m"))
            .await
            .unwrap_err();

        assert!(matches!(err, MetricError::DatasourceNotFound(_)));
        assert_eq!(logger.errors.lock().unwrap().len(), 1);
        assert!(executor.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repository_failure_is_not_a_missing_datasource() {
        let logger = Arc::new(RecordingLogger::default());
        let repo = MockDatasourceRepository {
            datasources: vec![],
            fail: true,
        };

        let err = gateway(repo, Arc::new(MockExecutor::returning(vec![])), logger.clone())
            .resolve(Uuid::new_v4())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, MetricError::DatasourceLookup(_)));
        assert_eq!(logger.errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unregistered_plugin_is_fatal() {
        let ws = Uuid::new_v4();
        let logger = Arc::new(RecordingLogger::default());
        let repo = MockDatasourceRepository {
            datasources: vec![datasource(ws, "graphite")],
            fail: false,
        };

        let err = gateway(repo, Arc::new(MockExecutor::returning(vec![])), logger.clone())
            .execute(ws, "up", &Period::new(1, "h"), &Period::new(1, "m"))
            .await
            .unwrap_err();

        assert!(matches!(err, MetricError::PluginNotFound(ref src) if src == "graphite"));
        let errors = logger.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, messages::PLUGIN_NOT_FOUND_ERROR);
    }

    #[tokio::test]
    async fn backend_error_passes_through() {
        let ws = Uuid::new_v4();
        let logger = Arc::new(RecordingLogger::default());
        let repo = MockDatasourceRepository {
            datasources: vec![datasource(ws, "prometheus")],
            fail: false,
        };

        let err = gateway(repo, Arc::new(MockExecutor::failing("bad query")), logger.clone())
            .execute(ws, "up", &Period::new(1, "h"), &Period::new(1, "m"))
            .await
            .unwrap_err();

        assert!(matches!(err, MetricError::Backend(_)));
        assert_eq!(err.to_string(), "bad query");
        assert_eq!(logger.errors.lock().unwrap().len(), 1);
    }
}
