use async_trait::async_trait;
use uuid::Uuid;

/// Source of the components deployed in a circle.
#[async_trait]
pub trait DeploymentClient: Send + Sync {
    /// Raw JSON body listing `{name, moduleName}` entries.
    async fn get_components(
        &self,
        circle_header: &str,
        circle_id: &str,
        workspace_id: Uuid,
    ) -> anyhow::Result<Vec<u8>>;
}
