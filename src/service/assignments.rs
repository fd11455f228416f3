//! User-role assignment administration logic

use crate::catalog::EntityCatalog;
use crate::client::PolicyStoreApi;
use crate::domain::{is_protected_subject, AssignRoleInput, EnhancedRoleAssignment, User};
use crate::error::{AppError, Result};
use crate::projector::{group_assignments_by_tenant, project, TenantSection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// One user row in a tenant listing, with their assignments in that tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUser {
    pub user: User,
    pub assignments: Vec<EnhancedRoleAssignment>,
}

/// Users of a tenant with their role assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUsers {
    pub tenant: String,
    pub tenant_name: String,
    pub users: Vec<TenantUser>,
}

pub struct AssignmentService<P: PolicyStoreApi> {
    store: Arc<P>,
}

impl<P: PolicyStoreApi> AssignmentService<P> {
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Tenant-grouped assignment view, protected rows first
    pub async fn grouped_assignments(&self) -> Result<Vec<TenantSection<EnhancedRoleAssignment>>> {
        let (assignments, users, tenants) = tokio::try_join!(
            self.store.list_role_assignments(),
            self.store.list_users(),
            self.store.list_tenants(),
        )?;

        let catalog = EntityCatalog::new(users, tenants);
        let projection = project(&[], &assignments, &catalog);
        Ok(group_assignments_by_tenant(&projection.role_assignments))
    }

    pub async fn assign_role(
        &self,
        input: &AssignRoleInput,
    ) -> Result<Vec<TenantSection<EnhancedRoleAssignment>>> {
        self.refuse_protected_role(&input.role)?;
        input.validate()?;
        self.ensure_known_tenant(&input.tenant).await?;
        self.store.assign_role(input).await?;
        self.grouped_assignments().await
    }

    /// Removes exactly the `(user, role, tenant)` triple; the user's other
    /// role/tenant combinations are untouched.
    pub async fn unassign_role(
        &self,
        input: &AssignRoleInput,
    ) -> Result<Vec<TenantSection<EnhancedRoleAssignment>>> {
        self.refuse_protected_role(&input.role)?;
        input.validate()?;
        self.store.unassign_role(input).await?;
        self.grouped_assignments().await
    }

    /// Users of one tenant with their assignments, ordered by role priority
    pub async fn tenant_users(&self, tenant: &str) -> Result<TenantUsers> {
        let (assignments, users, tenants) = tokio::try_join!(
            self.store.list_role_assignments(),
            self.store.list_users(),
            self.store.list_tenants(),
        )?;

        let catalog = EntityCatalog::new(users, tenants);
        if !catalog.is_known_tenant(tenant) {
            return Err(AppError::NotFound(format!("Tenant {} not found", tenant)));
        }

        let projection = project(&[], &assignments, &catalog);
        let users = catalog
            .users_in_tenant(tenant)
            .into_iter()
            .map(|user| TenantUser {
                user: user.clone(),
                assignments: projection
                    .role_assignments
                    .iter()
                    .filter(|a| a.assignment.tenant == tenant && a.assignment.user_id == user.id)
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(TenantUsers {
            tenant: tenant.to_string(),
            tenant_name: catalog.tenant_name(tenant),
            users,
        })
    }

    fn refuse_protected_role(&self, role: &str) -> Result<()> {
        if is_protected_subject(role) {
            return Err(AppError::Forbidden(format!(
                "The {} role cannot be granted or revoked through this console",
                role
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
