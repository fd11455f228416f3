//! Domain models for Depot Admin

pub mod catalog;
pub mod policy;
pub mod role;
pub mod upgrade_target;

pub use catalog::*;
pub use policy::*;
pub use role::*;
pub use upgrade_target::*;
