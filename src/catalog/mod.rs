//! Entity catalog
//!
//! Read-only snapshot of users, tenants, and the object/action vocabulary.
//! Built once per request from the upstream catalog reads; lookups degrade to
//! the raw id when a joined entity was deleted out-of-band, so a tuple always
//! renders as something.

use crate::domain::{is_role_subject, role_display_name, Tenant, User, VocabularyEntry};
use std::collections::HashMap;

/// Objects administrable through the console
const OBJECT_VOCABULARY: &[(&str, &str)] = &[
    ("project", "Project"),
    ("package", "Package"),
    ("release", "Release"),
    ("token", "Client Access Token"),
    ("upgrade-target", "Upgrade Target"),
    ("*", "All Resources"),
];

/// Actions grantable on those objects
const ACTION_VOCABULARY: &[(&str, &str)] = &[
    ("read", "Read"),
    ("write", "Write"),
    ("delete", "Delete"),
    ("*", "All Actions"),
];

/// Immutable catalog snapshot keyed by entity id
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    users: HashMap<String, User>,
    tenants: HashMap<String, Tenant>,
}

impl EntityCatalog {
    pub fn new(users: Vec<User>, tenants: Vec<Tenant>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            tenants: tenants.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn user_name(&self, id: &str) -> String {
        self.users
            .get(id)
            .map_or_else(|| id.to_string(), |u| u.name.clone())
    }

    pub fn tenant_name(&self, id: &str) -> String {
        self.tenants
            .get(id)
            .map_or_else(|| id.to_string(), |t| t.name.clone())
    }

    /// Display name for a policy subject: role table for role codes,
    /// user catalog otherwise
    pub fn subject_name(&self, subject: &str) -> String {
        if is_role_subject(subject) || subject == "admin" {
            role_display_name(subject)
        } else {
            self.user_name(subject)
        }
    }

    pub fn object_name(&self, code: &str) -> String {
        vocabulary_name(OBJECT_VOCABULARY, code)
    }

    pub fn action_name(&self, code: &str) -> String {
        vocabulary_name(ACTION_VOCABULARY, code)
    }

    pub fn is_known_tenant(&self, id: &str) -> bool {
        self.tenants.contains_key(id)
    }

    /// Users belonging to the given tenant
    pub fn users_in_tenant(&self, tenant: &str) -> Vec<&User> {
        let mut users: Vec<&User> = self
            .users
            .values()
            .filter(|u| u.tenants.iter().any(|t| t == tenant))
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    /// Object vocabulary for form dropdowns
    pub fn objects() -> Vec<VocabularyEntry> {
        to_entries(OBJECT_VOCABULARY)
    }

    /// Action vocabulary for form dropdowns
    pub fn actions() -> Vec<VocabularyEntry> {
        to_entries(ACTION_VOCABULARY)
    }
}

fn vocabulary_name(table: &[(&str, &str)], code: &str) -> String {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| code.to_string(), |(_, name)| name.to_string())
}

fn to_entries(table: &[(&str, &str)]) -> Vec<VocabularyEntry> {
    table
        .iter()
        .map(|(code, name)| VocabularyEntry {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}
