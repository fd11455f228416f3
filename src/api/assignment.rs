//! User-role assignment API handlers

use crate::api::SuccessResponse;
use crate::domain::AssignRoleInput;
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Tenant-grouped role assignments
pub async fn list_assignments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let sections = state.assignment_service.grouped_assignments().await?;
    Ok(Json(SuccessResponse::new(sections)))
}

/// Assign a role to a user within a tenant
pub async fn assign_role(
    State(state): State<AppState>,
    Json(input): Json<AssignRoleInput>,
) -> Result<impl IntoResponse> {
    let sections = state.assignment_service.assign_role(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(sections))))
}

/// Remove one role from a user within a tenant
pub async fn unassign_role(
    State(state): State<AppState>,
    Json(input): Json<AssignRoleInput>,
) -> Result<impl IntoResponse> {
    let sections = state.assignment_service.unassign_role(&input).await?;
    Ok(Json(SuccessResponse::new(sections)))
}

/// Users of a tenant with their role assignments
pub async fn tenant_users(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<impl IntoResponse> {
    let listing = state.assignment_service.tenant_users(&tenant).await?;
    Ok(Json(SuccessResponse::new(listing)))
}

#[cfg(test)]
mod tests {
    use crate::domain::AssignRoleInput;

    #[test]
    fn test_assign_role_input_deserialization() {
        let json = r#"{
            "user_id": "u7",
            "role": "publisher",
            "tenant": "t1"
        }"#;
        let input: AssignRoleInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.user_id, "u7");
        assert_eq!(input.role, "publisher");
        assert_eq!(input.tenant, "t1");
    }
}
