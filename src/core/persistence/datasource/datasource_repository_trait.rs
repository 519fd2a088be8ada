use async_trait::async_trait;
use uuid::Uuid;

use super::datasource_entity::DatasourceEntity;

#[async_trait]
pub trait DatasourceRepository: Send + Sync {
    /// Health datasource of the workspace, `None` when none is registered.
    async fn find_health_by_workspace_id(
        &self,
        workspace_id: Uuid,
    ) -> anyhow::Result<Option<DatasourceEntity>>;
}
