use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MOOVE_URL: &str = "http://localhost:8080";
const DEFAULT_DATASOURCE_FILE: &str = "data/datasources.json";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_MOOVE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PLUGIN_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 4;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `TEST` disables metric logging.
    pub env: String,
    pub bind_addr: String,
    pub moove_url: String,
    pub moove_timeout: Duration,
    pub datasource_file: PathBuf,
    /// Plugin source name -> remote plugin endpoint.
    pub plugins: HashMap<String, String>,
    pub plugin_timeout: Duration,
    pub max_concurrent_queries: usize,
    pub log_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let moove_timeout_secs = match lookup("MOOVE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("MOOVE_TIMEOUT_SECS must be an integer, got {v:?}"))?,
            None => DEFAULT_MOOVE_TIMEOUT_SECS,
        };

        let plugin_timeout_secs = match lookup("COMPASS_PLUGIN_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().with_context(|| {
                format!("COMPASS_PLUGIN_TIMEOUT_SECS must be an integer, got {v:?}")
            })?,
            None => DEFAULT_PLUGIN_TIMEOUT_SECS,
        };

        let max_concurrent_queries = match lookup("COMPASS_MAX_CONCURRENT_QUERIES") {
            Some(v) => v.parse::<usize>().with_context(|| {
                format!("COMPASS_MAX_CONCURRENT_QUERIES must be an integer, got {v:?}")
            })?,
            None => DEFAULT_MAX_CONCURRENT_QUERIES,
        };
        if max_concurrent_queries == 0 {
            return Err(anyhow!("COMPASS_MAX_CONCURRENT_QUERIES must be at least 1"));
        }

        let plugins = match lookup("COMPASS_PLUGINS") {
            Some(raw) => parse_plugins(&raw)?,
            None => HashMap::new(),
        };

        Ok(Self {
            env: get("ENV", ""),
            bind_addr: get("COMPASS_BIND_ADDR", DEFAULT_BIND_ADDR),
            moove_url: get("MOOVE_URL", DEFAULT_MOOVE_URL),
            moove_timeout: Duration::from_secs(moove_timeout_secs),
            datasource_file: PathBuf::from(get("COMPASS_DATASOURCE_FILE", DEFAULT_DATASOURCE_FILE)),
            plugins,
            plugin_timeout: Duration::from_secs(plugin_timeout_secs),
            max_concurrent_queries,
            log_dir: get("COMPASS_LOG_DIR", DEFAULT_LOG_DIR),
        })
    }
}

/// Parses `src=url,src=url`.
fn parse_plugins(raw: &str) -> Result<HashMap<String, String>> {
    let mut plugins = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (src, url) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid COMPASS_PLUGINS entry {entry:?}, expected src=url"))?;
        let (src, url) = (src.trim(), url.trim());
        if src.is_empty() || url.is_empty() {
            return Err(anyhow!("invalid COMPASS_PLUGINS entry {entry:?}, expected src=url"));
        }
        plugins.insert(src.to_string(), url.to_string());
    }

    Ok(plugins)
}
