//! Policy administration API handlers

use crate::api::SuccessResponse;
use crate::catalog::EntityCatalog;
use crate::domain::{AddRolePolicyInput, AddUserPolicyInput, VocabularyEntry};
use crate::error::Result;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Object/action codes offered by the grant forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub objects: Vec<VocabularyEntry>,
    pub actions: Vec<VocabularyEntry>,
}

/// Object/action vocabulary for the grant form dropdowns
pub async fn vocabulary() -> impl IntoResponse {
    Json(SuccessResponse::new(Vocabulary {
        objects: EntityCatalog::objects(),
        actions: EntityCatalog::actions(),
    }))
}

/// Tenant-grouped overview of role policies, user policies, and assignments
pub async fn permission_overview(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let overview = state.permission_service.overview().await?;
    Ok(Json(SuccessResponse::new(overview)))
}

/// Grant a role policy
pub async fn add_role_policy(
    State(state): State<AppState>,
    Json(input): Json<AddRolePolicyInput>,
) -> Result<impl IntoResponse> {
    let overview = state.permission_service.add_role_policy(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(overview))))
}

/// Revoke a role policy
pub async fn remove_role_policy(
    State(state): State<AppState>,
    Json(input): Json<AddRolePolicyInput>,
) -> Result<impl IntoResponse> {
    let overview = state.permission_service.remove_role_policy(&input).await?;
    Ok(Json(SuccessResponse::new(overview)))
}

/// Grant a direct user policy
pub async fn add_user_policy(
    State(state): State<AppState>,
    Json(input): Json<AddUserPolicyInput>,
) -> Result<impl IntoResponse> {
    let overview = state.permission_service.add_user_policy(&input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(overview))))
}

/// Revoke a direct user policy
pub async fn remove_user_policy(
    State(state): State<AppState>,
    Json(input): Json<AddUserPolicyInput>,
) -> Result<impl IntoResponse> {
    let overview = state.permission_service.remove_user_policy(&input).await?;
    Ok(Json(SuccessResponse::new(overview)))
}

#[cfg(test)]
mod tests {
    use crate::domain::{AddRolePolicyInput, AddUserPolicyInput};

    #[test]
    fn test_add_role_policy_input_deserialization() {
        let json = r#"{
            "role": "viewer",
            "tenant": "t1",
            "object": "project",
            "action": "read"
        }"#;
        let input: AddRolePolicyInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.role, "viewer");
        assert_eq!(input.tenant, "t1");
    }

    #[test]
    fn test_add_user_policy_input_deserialization() {
        let json = r#"{
            "user_id": "u7",
            "tenant": "t1",
            "object": "*",
            "action": "*"
        }"#;
        let input: AddUserPolicyInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.user_id, "u7");
        assert_eq!(input.object, "*");
    }
}
