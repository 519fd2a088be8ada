use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use uuid::Uuid;

use super::datasource_entity::DatasourceEntity;
use super::datasource_repository_trait::DatasourceRepository;

/// Datasources stored as a JSON array on disk.
///
/// The file is re-read on every lookup so edits apply without a restart.
/// A missing file behaves like an empty store.
pub struct DatasourceFsRepository {
    path: PathBuf,
}

impl DatasourceFsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<DatasourceEntity>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read datasource file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse datasource file {}", self.path.display()))
    }
}

#[async_trait]
impl DatasourceRepository for DatasourceFsRepository {
    async fn find_health_by_workspace_id(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<DatasourceEntity>> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|d| d.is_health_for(workspace_id)))
    }
}
