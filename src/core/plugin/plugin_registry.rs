use std::collections::HashMap;
use std::sync::Arc;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use super::query_executor::QueryExecutor;
use super::remote_plugin_executor::RemotePluginExecutor;
use crate::domain::health::error::MetricError;

/// Backends keyed by the `plugin_src` stored on datasources.
///
/// Filled once at startup and read-only afterwards.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn QueryExecutor>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one remote executor per `src -> url` entry, sharing a client
    /// bounded by `timeout`.
    pub fn from_remote_endpoints(
        endpoints: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build plugin HTTP client")?;

        let mut registry = Self::new();
        for (src, url) in endpoints {
            info!(plugin_src = %src, %url, "Registering remote plugin");
            registry.register(src, Arc::new(RemotePluginExecutor::new(client.clone(), url)));
        }
        Ok(registry)
    }

    pub fn register(&mut self, plugin_src: &str, executor: Arc<dyn QueryExecutor>) {
        self.plugins.insert(plugin_src.to_string(), executor);
    }

    pub fn get_plugin_by_src(&self, plugin_src: &str) -> Result<Arc<dyn QueryExecutor>, MetricError> {
        self.plugins
            .get(plugin_src)
            .cloned()
            .ok_or_else(|| MetricError::PluginNotFound(plugin_src.to_string()))
    }

    pub fn plugin_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        sources.sort_unstable();
        sources
    }
}
