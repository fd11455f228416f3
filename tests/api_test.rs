//! API integration tests against a running app with mocked upstreams

use crate::common::TestApp;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod common;

fn list_envelope(data: Value) -> Value {
    json!({"success": true, "message": "", "data": data})
}

async fn mount_policy_store_lists(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(json!([
            {"subject": "admin", "domain": "*", "object": "*", "action": "*"},
            {"subject": "viewer", "domain": "t1", "object": "project", "action": "read"},
            {"subject": "u1", "domain": "t1", "object": "package", "action": "write"}
        ]))))
        .mount(&app.policy_store)
        .await;

    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(json!([
            {"user_id": "u1", "tenant": "t1", "role": "owner"},
            {"user_id": "u2", "tenant": "t1", "role": "viewer"}
        ]))))
        .mount(&app.policy_store)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(json!([
            {"id": "u1", "name": "Alice", "tenants": ["t1"]},
            {"id": "u2", "name": "Bob", "tenants": ["t1"]}
        ]))))
        .mount(&app.policy_store)
        .await;

    Mock::given(method("GET"))
        .and(path("/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(json!([
            {"id": "t1", "name": "Acme"}
        ]))))
        .mount(&app.policy_store)
        .await;
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;
    let client = app.http_client();

    let response = client
        .get(&app.api_url("/health"))
        .send()
        .await
        .expect("Failed to call health endpoint");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_vocabulary_lists_objects_and_actions() {
    let app = TestApp::spawn().await;
    let client = app.http_client();

    let response = client
        .get(&app.api_url("/api/v1/permissions/vocabulary"))
        .send()
        .await
        .expect("Failed to call vocabulary endpoint");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    let objects = body["data"]["objects"].as_array().unwrap();
    assert!(objects.iter().any(|o| o["code"] == "upgrade-target"));
    let actions = body["data"]["actions"].as_array().unwrap();
    assert!(actions.iter().any(|a| a["code"] == "*"));
}

#[tokio::test]
async fn test_permission_overview_groups_and_excludes_admin_sentinel() {
    let app = TestApp::spawn().await;
    mount_policy_store_lists(&app).await;
    let client = app.http_client();

    let response = client
        .get(&app.api_url("/api/v1/permissions/overview"))
        .send()
        .await
        .expect("Failed to call overview endpoint");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    let data = &body["data"];

    // Admin sentinel tuple must not appear in either partition
    let role_sections = data["role_policies"].as_array().unwrap();
    assert_eq!(role_sections.len(), 1);
    assert_eq!(role_sections[0]["tenant"], "t1");
    assert_eq!(role_sections[0]["tenant_name"], "Acme");
    let role_rows = role_sections[0]["rows"].as_array().unwrap();
    assert_eq!(role_rows.len(), 1);
    assert_eq!(role_rows[0]["subject"], "viewer");
    assert_eq!(role_rows[0]["kind"], "role");

    let user_sections = data["user_policies"].as_array().unwrap();
    assert_eq!(user_sections.len(), 1);
    let user_rows = user_sections[0]["rows"].as_array().unwrap();
    assert_eq!(user_rows.len(), 1);
    assert_eq!(user_rows[0]["subject"], "u1");
    assert_eq!(user_rows[0]["subject_name"], "Alice");

    // Owner sorts before viewer and is not removable
    let assignment_sections = data["role_assignments"].as_array().unwrap();
    let rows = assignment_sections[0]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["role"], "owner");
    assert_eq!(rows[0]["removable"], false);
    assert_eq!(rows[1]["role"], "viewer");
    assert_eq!(rows[1]["removable"], true);
}

#[tokio::test]
async fn test_add_role_policy_for_admin_is_forbidden_without_upstream_call() {
    let app = TestApp::spawn().await;
    // No POST mock mounted: a forwarded request would surface as an error
    // other than 403, so the status proves the guard ran first
    let client = app.http_client();

    let response = client
        .post(&app.api_url("/api/v1/role-policies"))
        .json(&json!({
            "role": "admin",
            "tenant": "t1",
            "object": "project",
            "action": "read"
        }))
        .send()
        .await
        .expect("Failed to call add role policy endpoint");

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn test_add_role_policy_empty_role_is_unprocessable() {
    let app = TestApp::spawn().await;
    let client = app.http_client();

    let response = client
        .post(&app.api_url("/api/v1/role-policies"))
        .json(&json!({
            "role": "",
            "tenant": "t1",
            "object": "project",
            "action": "read"
        }))
        .send()
        .await
        .expect("Failed to call add role policy endpoint");

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn test_delete_active_upgrade_target_is_conflict() {
    let app = TestApp::spawn().await;
    let id = Uuid::new_v4();

    // Only the list endpoint is mounted; the guard must refuse before any
    // DELETE reaches the registry
    Mock::given(method("GET"))
        .and(path("/upgrade-targets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(json!([{
            "id": id,
            "project_id": "550e8400-e29b-41d4-a716-446655440000",
            "package_id": "550e8400-e29b-41d4-a716-446655440001",
            "release_id": "550e8400-e29b-41d4-a716-446655440002",
            "name": "stable rollout",
            "description": null,
            "is_active": true,
            "file_name": null,
            "file_size": null,
            "created_at": "2026-08-01T12:00:00Z"
        }]))))
        .mount(&app.registry)
        .await;

    let client = app.http_client();
    let response = client
        .delete(&app.api_url(&format!("/api/v1/upgrade-targets/{}", id)))
        .send()
        .await
        .expect("Failed to call delete endpoint");

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn test_tenant_users_unknown_tenant_is_not_found() {
    let app = TestApp::spawn().await;
    mount_policy_store_lists(&app).await;
    let client = app.http_client();

    let response = client
        .get(&app.api_url("/api/v1/tenants/nope/users"))
        .send()
        .await
        .expect("Failed to call tenant users endpoint");

    assert_eq!(response.status().as_u16(), 404);
}
