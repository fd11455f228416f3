//! Entity catalog domain models
//!
//! Read-only snapshots fetched from the upstream services; everything else
//! joins against these by id.

use serde::{Deserialize, Serialize};

/// Platform user as reported by the user catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Tenants the user belongs to (may be empty)
    #[serde(default)]
    pub tenants: Vec<String>,
}

/// Tenant (domain): isolation boundary for policy tuples and assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

/// Entry of the object/action vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub code: String,
    pub name: String,
}
