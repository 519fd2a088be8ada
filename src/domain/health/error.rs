use thiserror::Error;
use uuid::Uuid;

/// Failures of a circle metric request. Each one aborts the whole request.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("no health datasource registered for workspace {0}")]
    DatasourceNotFound(Uuid),

    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    #[error("not found metric type: {0}")]
    UnsupportedMetricType(String),

    #[error("unknown projection type: {0}")]
    UnknownProjection(String),

    #[error("component list unavailable: {0}")]
    ComponentListUnavailable(anyhow::Error),

    #[error("malformed component list: {0}")]
    MalformedComponentList(#[from] serde_json::Error),

    /// Error reported by the datasource lookup itself, not a missing record.
    #[error("datasource lookup failed: {0}")]
    DatasourceLookup(anyhow::Error),

    /// Opaque error returned by the backend, passed through as is.
    #[error(transparent)]
    Backend(anyhow::Error),
}
