//! Permission administration logic
//!
//! Submission protocol for every mutation: refuse protected subjects and
//! validate the input before any network call, submit to the store, then
//! re-fetch the full overview. Local state is never patched optimistically;
//! the next fetch is the sole source of truth.

use crate::catalog::EntityCatalog;
use crate::client::PolicyStoreApi;
use crate::domain::{
    is_protected_subject, is_role_subject, AddRolePolicyInput, AddUserPolicyInput, EnhancedPolicy,
    EnhancedRoleAssignment,
};
use crate::error::{AppError, Result};
use crate::projector::{
    group_assignments_by_tenant, group_policies_by_tenant, project, TenantSection,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Tenant-grouped, display-ready view of the authorization graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionOverview {
    pub role_policies: Vec<TenantSection<EnhancedPolicy>>,
    pub user_policies: Vec<TenantSection<EnhancedPolicy>>,
    pub role_assignments: Vec<TenantSection<EnhancedRoleAssignment>>,
}

pub struct PermissionService<P: PolicyStoreApi> {
    store: Arc<P>,
}

impl<P: PolicyStoreApi> PermissionService<P> {
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Fetch raw tuples and catalogs independently, join, and group
    pub async fn overview(&self) -> Result<PermissionOverview> {
        let (policies, assignments, users, tenants) = tokio::try_join!(
            self.store.list_policies(),
            self.store.list_role_assignments(),
            self.store.list_users(),
            self.store.list_tenants(),
        )?;

        let catalog = EntityCatalog::new(users, tenants);
        let projection = project(&policies, &assignments, &catalog);

        Ok(PermissionOverview {
            role_policies: group_policies_by_tenant(&projection.role_policies),
            user_policies: group_policies_by_tenant(&projection.user_policies),
            role_assignments: group_assignments_by_tenant(&projection.role_assignments),
        })
    }

    pub async fn add_role_policy(&self, input: &AddRolePolicyInput) -> Result<PermissionOverview> {
        self.refuse_protected_role(&input.role)?;
        input.validate()?;
        self.ensure_known_tenant(&input.tenant).await?;
        self.store.add_role_policy(input).await?;
        self.overview().await
    }

    pub async fn remove_role_policy(
        &self,
        input: &AddRolePolicyInput,
    ) -> Result<PermissionOverview> {
        self.refuse_protected_role(&input.role)?;
        input.validate()?;
        self.store.remove_role_policy(input).await?;
        self.overview().await
    }

    pub async fn add_user_policy(&self, input: &AddUserPolicyInput) -> Result<PermissionOverview> {
        input.validate()?;
        self.refuse_role_as_user(&input.user_id)?;
        self.ensure_known_tenant(&input.tenant).await?;
        self.store.add_user_policy(input).await?;
        self.overview().await
    }

    pub async fn remove_user_policy(
        &self,
        input: &AddUserPolicyInput,
    ) -> Result<PermissionOverview> {
        input.validate()?;
        self.refuse_role_as_user(&input.user_id)?;
        self.store.remove_user_policy(input).await?;
        self.overview().await
    }

    /// `admin` and `owner` rows never expose mutation controls; refuse the
    /// underlying operation even if invoked directly.
    fn refuse_protected_role(&self, role: &str) -> Result<()> {
        if is_protected_subject(role) {
            return Err(AppError::Forbidden(format!(
                "The {} role cannot be modified through this console",
                role
            )));
        }
        Ok(())
    }

    /// A direct policy subject must be a user id, not a role code
    fn refuse_role_as_user(&self, user_id: &str) -> Result<()> {
        if user_id == "admin" || is_role_subject(user_id) {
            return Err(AppError::Validation(format!(
                "{} is a role code, not a user id",
                user_id
            )));
        }
        Ok(())
    }

    async fn ensure_known_tenant(&self, tenant: &str) -> Result<()> {
        let tenants = self.store.list_tenants().await?;
        if tenants.iter().any(|t| t.id == tenant) {
            Ok(())
        } else {
            Err(AppError::Validation(format!("Unknown tenant: {}", tenant)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::policy_store::MockPolicyStoreApi;
    use crate::domain::{PolicyTuple, Tenant, User, UserRoleAssignment};

    fn tenants() -> Vec<Tenant> {
        vec![
            Tenant {
                id: "t1".to_string(),
                name: "Tenant One".to_string(),
            },
            Tenant {
                id: "t2".to_string(),
                name: "Tenant Two".to_string(),
            },
        ]
    }

    fn users() -> Vec<User> {
        vec![User {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            tenants: vec!["t1".to_string()],
        }]
    }

    fn role_policy_input() -> AddRolePolicyInput {
        AddRolePolicyInput {
            role: "viewer".to_string(),
            tenant: "t1".to_string(),
            object: "project".to_string(),
            action: "read".to_string(),
        }
    }

    fn expect_overview_fetch(mock: &mut MockPolicyStoreApi) {
        mock.expect_list_policies().returning(|| {
            Ok(vec![PolicyTuple {
                subject: "viewer".to_string(),
                domain: "t1".to_string(),
                object: "project".to_string(),
                action: "read".to_string(),
            }])
        });
        mock.expect_list_role_assignments().returning(|| {
            Ok(vec![UserRoleAssignment {
                user_id: "u1".to_string(),
                tenant: "t1".to_string(),
                role: "viewer".to_string(),
            }])
        });
        mock.expect_list_users().returning(|| Ok(users()));
        mock.expect_list_tenants().returning(|| Ok(tenants()));
    }

    #[tokio::test]
    async fn test_overview_groups_by_tenant() {
        let mut mock = MockPolicyStoreApi::new();
        expect_overview_fetch(&mut mock);

        let service = PermissionService::new(Arc::new(mock));
        let overview = service.overview().await.unwrap();

        assert_eq!(overview.role_policies.len(), 1);
        assert_eq!(overview.role_policies[0].tenant, "t1");
        assert_eq!(overview.role_policies[0].tenant_name, "Tenant One");
        assert_eq!(overview.role_assignments[0].rows[0].user_name, "Alice");
    }

    #[tokio::test]
    async fn test_add_role_policy_submits_then_refetches() {
        let mut mock = MockPolicyStoreApi::new();
        mock.expect_add_role_policy()
            .times(1)
            .returning(|_| Ok(()));
        expect_overview_fetch(&mut mock);

        let service = PermissionService::new(Arc::new(mock));
        let result = service.add_role_policy(&role_policy_input()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_role_policy_empty_tenant_rejected_before_any_call() {
        // No expectations: any store call would panic the mock
        let mock = MockPolicyStoreApi::new();
        let service = PermissionService::new(Arc::new(mock));

        let mut input = role_policy_input();
        input.tenant = "".to_string();

        let result = service.add_role_policy(&input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_role_policy_unknown_role_rejected() {
        let mock = MockPolicyStoreApi::new();
        let service = PermissionService::new(Arc::new(mock));

        let mut input = role_policy_input();
        input.role = "superuser".to_string();

        let result = service.add_role_policy(&input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_role_policy_unknown_tenant_rejected() {
        let mut mock = MockPolicyStoreApi::new();
        mock.expect_list_tenants().returning(|| Ok(tenants()));

        let service = PermissionService::new(Arc::new(mock));
        let mut input = role_policy_input();
        input.tenant = "t9".to_string();

        let result = service.add_role_policy(&input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_owner_policy_mutation_refused() {
        let mock = MockPolicyStoreApi::new();
        let service = PermissionService::new(Arc::new(mock));

        let mut input = role_policy_input();
        input.role = "owner".to_string();

        let result = service.remove_role_policy(&input).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_user_policy_with_role_code_subject_rejected() {
        let mock = MockPolicyStoreApi::new();
        let service = PermissionService::new(Arc::new(mock));

        let input = AddUserPolicyInput {
            user_id: "viewer".to_string(),
            tenant: "t1".to_string(),
            object: "project".to_string(),
            action: "read".to_string(),
        };

        let result = service.add_user_policy(&input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_add_surfaces_conflict_without_refetch() {
        let mut mock = MockPolicyStoreApi::new();
        mock.expect_list_tenants().returning(|| Ok(tenants()));
        mock.expect_add_role_policy()
            .times(1)
            .returning(|_| Err(AppError::Conflict("Policy already exists".to_string())));

        let service = PermissionService::new(Arc::new(mock));
        let result = service.add_role_policy(&role_policy_input()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_remove_missing_policy_is_terminal_failure() {
        let mut mock = MockPolicyStoreApi::new();
        mock.expect_remove_role_policy()
            .times(1)
            .returning(|_| Err(AppError::NotFound("No such policy".to_string())));

        let service = PermissionService::new(Arc::new(mock));
        let result = service.remove_role_policy(&role_policy_input()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
