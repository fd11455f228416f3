//! Policy tuple and role-assignment domain models

use super::role::is_role_subject;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Authorization grant: `(subject, domain, object, action)`.
///
/// `subject` is either a role code or a user id; which one is derived via
/// [`PolicyTuple::kind`], never stored. No two tuples share all four fields
/// (enforced by the policy store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTuple {
    pub subject: String,
    pub domain: String,
    pub object: String,
    pub action: String,
}

/// Derived tuple classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Role,
    User,
}

impl PolicyTuple {
    /// Classify the tuple by its subject. Returns `None` for the `admin`
    /// sentinel, which is implicitly all-access and never a data row.
    pub fn kind(&self) -> Option<PolicyKind> {
        if self.subject == "admin" {
            None
        } else if is_role_subject(&self.subject) {
            Some(PolicyKind::Role)
        } else {
            Some(PolicyKind::User)
        }
    }
}

/// `(user, tenant, role)` triple; a user may hold multiple roles across tenants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleAssignment {
    pub user_id: String,
    pub tenant: String,
    pub role: String,
}

/// Input for granting a role policy
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddRolePolicyInput {
    #[validate(length(min = 1), custom(function = "validate_grantable_role"))]
    pub role: String,
    #[validate(length(min = 1, max = 100))]
    pub tenant: String,
    #[validate(length(min = 1), custom(function = "validate_resource_code"))]
    pub object: String,
    #[validate(length(min = 1), custom(function = "validate_resource_code"))]
    pub action: String,
}

/// Input for granting a direct user policy
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddUserPolicyInput {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub tenant: String,
    #[validate(length(min = 1), custom(function = "validate_resource_code"))]
    pub object: String,
    #[validate(length(min = 1), custom(function = "validate_resource_code"))]
    pub action: String,
}

/// Input for assigning a role to a user within a tenant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignRoleInput {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,
    #[validate(length(min = 1), custom(function = "validate_grantable_role"))]
    pub role: String,
    #[validate(length(min = 1, max = 100))]
    pub tenant: String,
}

/// Policy tuple enriched with display names. Recomputed on every fetch,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedPolicy {
    #[serde(flatten)]
    pub tuple: PolicyTuple,
    pub kind: PolicyKind,
    pub subject_name: String,
    pub domain_name: String,
    pub object_name: String,
    pub action_name: String,
}

/// Role assignment enriched with display names and render metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedRoleAssignment {
    #[serde(flatten)]
    pub assignment: UserRoleAssignment,
    pub user_name: String,
    pub domain_name: String,
    pub role_name: String,
    /// Fixed render priority; protected rows surface first
    pub priority: u32,
    /// False for protected roles: the row carries no removal control
    pub removable: bool,
}

/// Validate object/action code format (e.g., "project", "upgrade-target", "*")
fn validate_resource_code(code: &str) -> Result<(), validator::ValidationError> {
    if RESOURCE_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_resource_code"))
    }
}

/// Role must be drawn from the assignable enumeration; `admin` is never grantable
fn validate_grantable_role(role: &str) -> Result<(), validator::ValidationError> {
    if is_role_subject(role) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("unknown_role"))
    }
}

// Regex for object/action code validation; `*` is the wildcard grant
lazy_static::lazy_static! {
    pub static ref RESOURCE_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^(\*|[a-z][a-z0-9]*(?:-[a-z0-9]+)*)$").unwrap();
}
