//! Server initialization and routing

use crate::api;
use crate::client::{PolicyStoreClient, RegistryClient};
use crate::config::Config;
use crate::service::{ActivationService, AssignmentService, PermissionService};
use anyhow::Result;
use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub permission_service: Arc<PermissionService<PolicyStoreClient>>,
    pub assignment_service: Arc<AssignmentService<PolicyStoreClient>>,
    pub activation_service: Arc<ActivationService<RegistryClient>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let policy_store = Arc::new(PolicyStoreClient::new(config.policy_store.clone()));
        let registry = Arc::new(RegistryClient::new(config.registry.clone()));

        Self {
            config: Arc::new(config),
            permission_service: Arc::new(PermissionService::new(policy_store.clone())),
            assignment_service: Arc::new(AssignmentService::new(policy_store)),
            activation_service: Arc::new(ActivationService::new(registry)),
        }
    }
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoint
        .route("/health", get(api::health::health))
        // Permission overview
        .route(
            "/api/v1/permissions/overview",
            get(api::policy::permission_overview),
        )
        .route(
            "/api/v1/permissions/vocabulary",
            get(api::policy::vocabulary),
        )
        // Role policy endpoints
        .route(
            "/api/v1/role-policies",
            post(api::policy::add_role_policy).delete(api::policy::remove_role_policy),
        )
        // User policy endpoints
        .route(
            "/api/v1/user-policies",
            post(api::policy::add_user_policy).delete(api::policy::remove_user_policy),
        )
        // Role assignment endpoints
        .route(
            "/api/v1/role-assignments",
            get(api::assignment::list_assignments)
                .post(api::assignment::assign_role)
                .delete(api::assignment::unassign_role),
        )
        .route(
            "/api/v1/tenants/{tenant}/users",
            get(api::assignment::tenant_users),
        )
        // Upgrade target endpoints
        .route(
            "/api/v1/upgrade-targets",
            get(api::upgrade_target::list_upgrade_targets)
                .post(api::upgrade_target::create_upgrade_target),
        )
        .route(
            "/api/v1/upgrade-targets/{id}/activation",
            post(api::upgrade_target::toggle_activation),
        )
        .route(
            "/api/v1/upgrade-targets/{id}",
            delete(api::upgrade_target::delete_upgrade_target),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let http_addr = config.http_addr();
    let state = AppState::new(config);

    let app = router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
