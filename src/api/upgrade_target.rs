//! Upgrade target API handlers

use crate::api::SuccessResponse;
use crate::domain::CreateUpgradeTargetInput;
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// List upgrade targets
pub async fn list_upgrade_targets(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let targets = state.activation_service.list().await?;
    Ok(Json(SuccessResponse::new(targets)))
}

/// Create an upgrade target
pub async fn create_upgrade_target(
    State(state): State<AppState>,
    Json(input): Json<CreateUpgradeTargetInput>,
) -> Result<impl IntoResponse> {
    let target = state.activation_service.create(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(target))))
}

/// Toggle active state; activation deactivates the current active target
/// first and only proceeds after that is acknowledged
pub async fn toggle_activation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let targets = state.activation_service.set_active(id).await?;
    Ok(Json(SuccessResponse::new(targets)))
}

/// Delete an inactive upgrade target
pub async fn delete_upgrade_target(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let targets = state.activation_service.delete(id).await?;
    Ok(Json(SuccessResponse::new(targets)))
}
