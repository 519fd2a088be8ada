use std::sync::Arc;

use anyhow::Result;

use crate::core::client::moove_client::MooveClient;
use crate::core::config::app_config::AppConfig;
use crate::core::logging::metric_logger::logger_for_env;
use crate::core::persistence::datasource::datasource_fs_repository::DatasourceFsRepository;
use crate::core::plugin::plugin_registry::PluginRegistry;
use crate::domain::health::service::circle_metric_service::CircleMetricService;
use crate::domain::health::service::plugin_gateway::PluginGateway;

#[derive(Clone)]
pub struct AppState {
    pub metric_service: Arc<CircleMetricService>,
}

impl AppState {
    pub fn new(metric_service: CircleMetricService) -> Self {
        Self {
            metric_service: Arc::new(metric_service),
        }
    }
}

pub fn build_app_state(config: &AppConfig) -> Result<AppState> {
    let logger = logger_for_env(&config.env);

    let registry = PluginRegistry::from_remote_endpoints(&config.plugins, config.plugin_timeout)?;
    let gateway = PluginGateway::new(
        Arc::new(DatasourceFsRepository::new(config.datasource_file.clone())),
        Arc::new(registry),
        logger.clone(),
    );

    let moove = MooveClient::new(&config.moove_url, config.moove_timeout)?;

    Ok(AppState::new(CircleMetricService::new(
        Arc::new(moove),
        gateway,
        logger,
        config.max_concurrent_queries,
    )))
}
