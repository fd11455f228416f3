//! Upgrade target domain models
//!
//! An upgrade target binds (project, package, release) to a distributable
//! artifact. Across the whole collection at most one target is active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Upgrade target entity as reported by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeTarget {
    pub id: Uuid,
    pub project_id: Uuid,
    pub package_id: Uuid,
    pub release_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an upgrade target.
///
/// Project, package and release are selected explicitly; the console resets
/// dependent selections when a parent changes, so all three arrive together.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUpgradeTargetInput {
    pub project_id: Uuid,
    pub package_id: Uuid,
    pub release_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}
