//! Enhanced policy projector
//!
//! Pure join of raw tuples against the entity catalog. The projector never
//! fails: missing lookups degrade to raw ids and malformed rows are still
//! rendered. Hard errors belong to the fetch layer.

use crate::catalog::EntityCatalog;
use crate::domain::{
    is_protected_subject, role_display_name, subject_priority, EnhancedPolicy,
    EnhancedRoleAssignment, PolicyKind, PolicyTuple, UserRoleAssignment,
};
use serde::{Deserialize, Serialize};

/// Result of projecting raw tuples: partitioned, enriched, display-ordered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub role_policies: Vec<EnhancedPolicy>,
    pub user_policies: Vec<EnhancedPolicy>,
    pub role_assignments: Vec<EnhancedRoleAssignment>,
}

/// Rows of one tenant section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSection<T> {
    pub tenant: String,
    pub tenant_name: String,
    pub rows: Vec<T>,
}

/// Join raw tuples and assignments against the catalog.
///
/// Partition rule: subject in the assignable role set (minus `admin`) is a
/// role policy, any other non-admin subject is a direct user policy. The
/// `admin` sentinel appears in neither partition by construction.
/// Assignments are ordered by the fixed role priority so protected rows
/// surface first; the sort is stable, so fetch order is preserved within a
/// priority.
pub fn project(
    policies: &[PolicyTuple],
    assignments: &[UserRoleAssignment],
    catalog: &EntityCatalog,
) -> Projection {
    let mut role_policies = Vec::new();
    let mut user_policies = Vec::new();

    for tuple in policies {
        let Some(kind) = tuple.kind() else {
            continue;
        };
        let enhanced = EnhancedPolicy {
            tuple: tuple.clone(),
            kind,
            subject_name: catalog.subject_name(&tuple.subject),
            domain_name: catalog.tenant_name(&tuple.domain),
            object_name: catalog.object_name(&tuple.object),
            action_name: catalog.action_name(&tuple.action),
        };
        match kind {
            PolicyKind::Role => role_policies.push(enhanced),
            PolicyKind::User => user_policies.push(enhanced),
        }
    }

    let mut role_assignments: Vec<EnhancedRoleAssignment> = assignments
        .iter()
        .map(|assignment| EnhancedRoleAssignment {
            assignment: assignment.clone(),
            user_name: catalog.user_name(&assignment.user_id),
            domain_name: catalog.tenant_name(&assignment.tenant),
            role_name: role_display_name(&assignment.role),
            priority: subject_priority(&assignment.role),
            removable: !is_protected_subject(&assignment.role),
        })
        .collect();
    role_assignments.sort_by_key(|a| a.priority);

    Projection {
        role_policies,
        user_policies,
        role_assignments,
    }
}

/// Group enhanced policies by tenant, preserving first-occurrence order.
/// Tenants are few and admins scan visually, so no sort is applied.
pub fn group_policies_by_tenant(policies: &[EnhancedPolicy]) -> Vec<TenantSection<EnhancedPolicy>> {
    let mut sections: Vec<TenantSection<EnhancedPolicy>> = Vec::new();
    for policy in policies {
        match sections
            .iter_mut()
            .find(|s| s.tenant == policy.tuple.domain)
        {
            Some(section) => section.rows.push(policy.clone()),
            None => sections.push(TenantSection {
                tenant: policy.tuple.domain.clone(),
                tenant_name: policy.domain_name.clone(),
                rows: vec![policy.clone()],
            }),
        }
    }
    sections
}

/// Group enhanced assignments by tenant, preserving first-occurrence order
pub fn group_assignments_by_tenant(
    assignments: &[EnhancedRoleAssignment],
) -> Vec<TenantSection<EnhancedRoleAssignment>> {
    let mut sections: Vec<TenantSection<EnhancedRoleAssignment>> = Vec::new();
    for assignment in assignments {
        match sections
            .iter_mut()
            .find(|s| s.tenant == assignment.assignment.tenant)
        {
            Some(section) => section.rows.push(assignment.clone()),
            None => sections.push(TenantSection {
                tenant: assignment.assignment.tenant.clone(),
                tenant_name: assignment.domain_name.clone(),
                rows: vec![assignment.clone()],
            }),
        }
    }
    sections
}
