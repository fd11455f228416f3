//! Registry client (upgrade targets)

use super::{expect_data, expect_ok};
use crate::config::RegistryConfig;
use crate::domain::{CreateUpgradeTargetInput, UpgradeTarget};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

const SERVICE: &str = "registry";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryApi: Send + Sync {
    async fn list_upgrade_targets(&self) -> Result<Vec<UpgradeTarget>>;
    async fn create_upgrade_target(&self, input: &CreateUpgradeTargetInput)
        -> Result<UpgradeTarget>;
    /// One half of the activation sequence: `PATCH /upgrade-targets/{id}`
    async fn set_upgrade_target_active(&self, id: Uuid, is_active: bool) -> Result<UpgradeTarget>;
    async fn delete_upgrade_target(&self, id: Uuid) -> Result<()>;
}

/// HTTP client for the registry REST API
#[derive(Clone)]
pub struct RegistryClient {
    config: RegistryConfig,
    http_client: Client,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn list_upgrade_targets(&self) -> Result<Vec<UpgradeTarget>> {
        let response = self
            .http_client
            .get(self.url("/upgrade-targets"))
            .bearer_auth(&self.config.service_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_data(SERVICE, response).await
    }

    async fn create_upgrade_target(
        &self,
        input: &CreateUpgradeTargetInput,
    ) -> Result<UpgradeTarget> {
        let response = self
            .http_client
            .post(self.url("/upgrade-targets"))
            .bearer_auth(&self.config.service_token)
            .json(input)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_data(SERVICE, response).await
    }

    async fn set_upgrade_target_active(&self, id: Uuid, is_active: bool) -> Result<UpgradeTarget> {
        let response = self
            .http_client
            .patch(self.url(&format!("/upgrade-targets/{}", id)))
            .bearer_auth(&self.config.service_token)
            .json(&json!({ "is_active": is_active }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_data(SERVICE, response).await
    }

    async fn delete_upgrade_target(&self, id: Uuid) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("/upgrade-targets/{}", id)))
            .bearer_auth(&self.config.service_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_ok(SERVICE, response).await
    }
}
