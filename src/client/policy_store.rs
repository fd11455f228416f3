//! Policy store client
//!
//! Typed CRUD over the three tuple kinds (role policies, user policies,
//! user-role assignments) plus the user/tenant catalog reads. Duplicate adds
//! are rejected by the store (HTTP 409), not merged; removals of missing
//! tuples come back as 404 and are treated as terminal failures since
//! silently ignoring them could mask a stale-view bug.

use super::{expect_data, expect_ok};
use crate::config::PolicyStoreConfig;
use crate::domain::{
    AddRolePolicyInput, AddUserPolicyInput, AssignRoleInput, PolicyTuple, Tenant, User,
    UserRoleAssignment,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;

const SERVICE: &str = "policy store";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PolicyStoreApi: Send + Sync {
    // Role policies
    async fn add_role_policy(&self, input: &AddRolePolicyInput) -> Result<()>;
    async fn remove_role_policy(&self, input: &AddRolePolicyInput) -> Result<()>;

    // Direct user policies
    async fn add_user_policy(&self, input: &AddUserPolicyInput) -> Result<()>;
    async fn remove_user_policy(&self, input: &AddUserPolicyInput) -> Result<()>;

    // User-role assignments
    async fn assign_role(&self, input: &AssignRoleInput) -> Result<()>;
    async fn unassign_role(&self, input: &AssignRoleInput) -> Result<()>;

    // Raw tuple reads
    async fn list_policies(&self) -> Result<Vec<PolicyTuple>>;
    async fn list_role_assignments(&self) -> Result<Vec<UserRoleAssignment>>;

    // Catalog reads
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn list_tenants(&self) -> Result<Vec<Tenant>>;
}

/// HTTP client for the policy store REST API
#[derive(Clone)]
pub struct PolicyStoreClient {
    config: PolicyStoreConfig,
    http_client: Client,
}

impl PolicyStoreClient {
    pub fn new(config: PolicyStoreConfig) -> Self {
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

    async fn post_json<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .http_client
            .post(self.url(path))
            .bearer_auth(&self.config.service_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_ok(SERVICE, response).await
    }

    async fn delete_json<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(path))
            .bearer_auth(&self.config.service_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_ok(SERVICE, response).await
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response = self
            .http_client
            .get(self.url(path))
            .bearer_auth(&self.config.service_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach {}: {}", SERVICE, e)))?;

        expect_data(SERVICE, response).await
    }
}

#[async_trait]
impl PolicyStoreApi for PolicyStoreClient {
    async fn add_role_policy(&self, input: &AddRolePolicyInput) -> Result<()> {
        self.post_json("/role-policies", input).await
    }

    async fn remove_role_policy(&self, input: &AddRolePolicyInput) -> Result<()> {
        self.delete_json("/role-policies", input).await
    }

    async fn add_user_policy(&self, input: &AddUserPolicyInput) -> Result<()> {
        self.post_json("/policies", input).await
    }

    async fn remove_user_policy(&self, input: &AddUserPolicyInput) -> Result<()> {
        self.delete_json("/policies", input).await
    }

    async fn assign_role(&self, input: &AssignRoleInput) -> Result<()> {
        self.post_json("/roles", input).await
    }

    async fn unassign_role(&self, input: &AssignRoleInput) -> Result<()> {
        self.delete_json("/roles", input).await
    }

    async fn list_policies(&self) -> Result<Vec<PolicyTuple>> {
        self.get_list("/policies").await
    }

    async fn list_role_assignments(&self) -> Result<Vec<UserRoleAssignment>> {
        self.get_list("/roles").await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.get_list("/users").await
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>> {
        self.get_list("/tenants").await
    }
}
