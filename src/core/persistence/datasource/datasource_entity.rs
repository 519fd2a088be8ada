use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored datasource configuration of a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceEntity {
    pub id: Uuid,
    pub name: String,
    pub workspace_id: Uuid,
    /// Name of the backend implementation serving this datasource.
    pub plugin_src: String,
    /// Backend-specific connection settings, forwarded verbatim.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Marks the datasource used for circle health metrics.
    #[serde(default)]
    pub health: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl DatasourceEntity {
    pub fn is_health_for(&self, workspace_id: Uuid) -> bool {
        self.workspace_id == workspace_id && self.health && self.deleted_at.is_none()
    }
}
