//! Role vocabulary and protected-subject rules
//!
//! Role codes form a closed enumeration. Whether a policy subject is a role
//! or a user id is derived from membership in this enumeration, never stored,
//! so the classification cannot drift if the role set changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enumerated role codes known to the platform.
///
/// `admin` (platform-wide) and `owner` (tenant-level) are reserved: their
/// rows are rendered but never mutable through the administration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleCode {
    Admin,
    Owner,
    User,
    Viewer,
    Publisher,
    Pm,
}

impl RoleCode {
    pub const ALL: [RoleCode; 6] = [
        RoleCode::Admin,
        RoleCode::Owner,
        RoleCode::User,
        RoleCode::Viewer,
        RoleCode::Publisher,
        RoleCode::Pm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCode::Admin => "admin",
            RoleCode::Owner => "owner",
            RoleCode::User => "user",
            RoleCode::Viewer => "viewer",
            RoleCode::Publisher => "publisher",
            RoleCode::Pm => "pm",
        }
    }

    /// Human-readable name for display rows
    pub fn display_name(&self) -> &'static str {
        match self {
            RoleCode::Admin => "Administrator",
            RoleCode::Owner => "Owner",
            RoleCode::User => "User",
            RoleCode::Viewer => "Viewer",
            RoleCode::Publisher => "Publisher",
            RoleCode::Pm => "Project Manager",
        }
    }

    /// Fixed render priority so high-privilege rows surface first
    /// regardless of fetch order. Usability invariant, not a security one.
    pub fn priority(&self) -> u32 {
        match self {
            RoleCode::Admin => 0,
            RoleCode::Owner => 1,
            RoleCode::User => 2,
            RoleCode::Viewer => 3,
            RoleCode::Publisher | RoleCode::Pm => 999,
        }
    }

    /// Protected roles carry no mutation affordance
    pub fn is_protected(&self) -> bool {
        matches!(self, RoleCode::Admin | RoleCode::Owner)
    }

    pub fn parse(code: &str) -> Option<RoleCode> {
        RoleCode::ALL.iter().copied().find(|r| r.as_str() == code)
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleCode::parse(s).ok_or_else(|| format!("Unknown role code: {}", s))
    }
}

/// `admin` or `owner`: rendered, never mutable through this surface.
pub fn is_protected_subject(subject: &str) -> bool {
    RoleCode::parse(subject).is_some_and(|r| r.is_protected())
}

/// Subject is an enumerated role code other than `admin`. Everything else
/// (excluding `admin`) is treated as a user id.
pub fn is_role_subject(subject: &str) -> bool {
    RoleCode::parse(subject).is_some_and(|r| r != RoleCode::Admin)
}

/// Render priority for an arbitrary subject; unknown codes sort last.
pub fn subject_priority(subject: &str) -> u32 {
    RoleCode::parse(subject).map_or(999, |r| r.priority())
}

/// Display name for a role code, falling back to the raw code.
pub fn role_display_name(code: &str) -> String {
    RoleCode::parse(code).map_or_else(|| code.to_string(), |r| r.display_name().to_string())
}
