//! Business logic services

pub mod activation;
pub mod assignments;
pub mod permissions;

pub use activation::ActivationService;
pub use assignments::AssignmentService;
pub use permissions::{PermissionOverview, PermissionService};
