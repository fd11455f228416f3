//! Typed clients for the upstream policy store and registry services
//!
//! Canonical state is owned by the upstream services; these clients expose
//! CRUD over it and translate transport failures and non-success envelopes
//! into the application error taxonomy. Mutations are never retried
//! automatically.

pub mod policy_store;
pub mod registry;

pub use policy_store::{PolicyStoreApi, PolicyStoreClient};
pub use registry::{RegistryApi, RegistryClient};

use crate::error::{AppError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Response envelope used by both upstream services.
///
/// A non-success discriminant is a typed failure even on HTTP 200 — never a
/// silent no-op.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Map a non-2xx upstream response to a typed error, surfacing the
/// upstream's human-readable message where the taxonomy calls for it.
async fn status_error(service: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .map(|e| e.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.clone());

    match status {
        StatusCode::CONFLICT => AppError::Conflict(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Validation(message)
        }
        _ => AppError::Upstream(format!("{} returned {}: {}", service, status, message)),
    }
}

/// Parse an envelope and require a data payload
pub(crate) async fn expect_data<T: DeserializeOwned>(
    service: &str,
    response: reqwest::Response,
) -> Result<T> {
    if !response.status().is_success() {
        return Err(status_error(service, response).await);
    }

    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to parse {} response: {}", service, e)))?;

    if !envelope.success {
        return Err(AppError::Conflict(envelope.message));
    }

    envelope
        .data
        .ok_or_else(|| AppError::Upstream(format!("{} response missing data", service)))
}

/// Parse an envelope where only the success discriminant matters
pub(crate) async fn expect_ok(service: &str, response: reqwest::Response) -> Result<()> {
    if !response.status().is_success() {
        return Err(status_error(service, response).await);
    }

    let envelope: Envelope<serde_json::Value> = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to parse {} response: {}", service, e)))?;

    if !envelope.success {
        return Err(AppError::Conflict(envelope.message));
    }

    Ok(())
}
