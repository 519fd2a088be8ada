use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use uuid::Uuid;

use super::deployment_client_trait::DeploymentClient;

pub const CIRCLE_ID_HEADER: &str = "x-circle-id";
pub const WORKSPACE_ID_HEADER: &str = "x-workspace-id";

/// HTTP client for the deployment-management (moove) service.
pub struct MooveClient {
    client: Client,
    base_url: String,
}

impl MooveClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn components_url(&self, circle_id: &str) -> String {
        format!(
            "{}/v2/circles/{}/components",
            self.base_url,
            urlencoding::encode(circle_id)
        )
    }
}

#[async_trait]
impl DeploymentClient for MooveClient {
    async fn get_components(
        &self,
        circle_header: &str,
        circle_id: &str,
        workspace_id: Uuid,
    ) -> Result<Vec<u8>> {
        let url = self.components_url(circle_id);
        debug!(%url, "Fetching circle components");

        let resp = self
            .client
            .get(&url)
            .header(CIRCLE_ID_HEADER, circle_header)
            .header(WORKSPACE_ID_HEADER, workspace_id.to_string())
            .send()
            .await
            .with_context(|| format!("Failed to call moove (url={})", url))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("moove returned {}: {} (url={})", status, text, url));
        }

        let body = resp
            .bytes()
            .await
            .with_context(|| format!("Failed to read moove response (url={})", url))?;

        Ok(body.to_vec())
    }
}
