//! REST API shared utilities (response types)

pub mod assignment;
pub mod health;
pub mod policy;
pub mod upgrade_target;

use serde::{Deserialize, Serialize};

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
