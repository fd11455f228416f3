//! Configuration management for Depot Admin

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Policy store configuration
    pub policy_store: PolicyStoreConfig,
    /// Registry configuration (upgrade targets)
    pub registry: RegistryConfig,
}

/// Policy store (authorization tuple service) configuration
#[derive(Debug, Clone)]
pub struct PolicyStoreConfig {
    /// Base URL for server-to-server communication (e.g., http://policy-store:8080)
    pub url: String,
    /// Service token sent as a bearer credential
    pub service_token: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Registry (package/release/upgrade-target service) configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL (e.g., http://registry:8080)
    pub url: String,
    /// Service token sent as a bearer credential
    pub service_token: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            policy_store: PolicyStoreConfig {
                url: env::var("POLICY_STORE_URL").context("POLICY_STORE_URL is required")?,
                service_token: env::var("POLICY_STORE_TOKEN").unwrap_or_default(),
                timeout_secs: env::var("POLICY_STORE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
            registry: RegistryConfig {
                url: env::var("REGISTRY_URL").context("REGISTRY_URL is required")?,
                service_token: env::var("REGISTRY_TOKEN").unwrap_or_default(),
                timeout_secs: env::var("REGISTRY_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
