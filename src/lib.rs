//! Depot Admin - Package Distribution Admin Console Backend
//!
//! This crate provides the backend-for-frontend for the Depot admin console,
//! including the permission administration REST API and integration with the
//! policy store and package registry services.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod projector;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
