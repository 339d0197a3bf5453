//! Integration tests for permission-guarded administration endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn permission_id(app: &helpers::TestApp, token: &str, name: &str) -> Uuid {
    let response = app
        .request("GET", "/api/permissions", None, Some(token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["data"]
        .as_array()
        .expect("permissions")
        .iter()
        .find(|p| p["name"] == name)
        .and_then(|p| p["id"].as_str())
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("seeded permission")
}

async fn create_role(app: &helpers::TestApp, token: &str, name: &str) -> Uuid {
    let response = app
        .request(
            "POST",
            "/api/roles",
            Some(json!({ "name": name, "description": "test role" })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.id()
}

async fn create_user_with_role(
    app: &helpers::TestApp,
    token: &str,
    email: &str,
    role_id: Uuid,
) -> Uuid {
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "email": email,
                "password": "secret1",
                "name": "Member",
                "role_id": role_id,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.id()
}

#[tokio::test]
async fn test_user_without_role_is_denied() {
    let app = helpers::TestApp::new().await;
    app.register("plain@x.com", "secret1", "Plain").await;
    let token = app.login("plain@x.com", "secret1").await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_admin_can_list_users() {
    let app = helpers::TestApp::new().await;
    app.register("plain@x.com", "secret1", "Plain").await;
    let token = app.admin_token().await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let users = response.body["data"].as_array().expect("users");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_granted_permission_allows_only_that_operation() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;

    let role_id = create_role(&app, &admin, "auditor").await;
    let read = permission_id(&app, &admin, "users:read").await;
    let assigned = app
        .request(
            "POST",
            &format!("/api/roles/{role_id}/permissions"),
            Some(json!({ "permission_id": read })),
            Some(&admin),
        )
        .await;
    assert_eq!(assigned.status, StatusCode::OK);
    assert_eq!(assigned.body["data"]["permissions"][0]["name"], "users:read");

    create_user_with_role(&app, &admin, "auditor@x.com", role_id).await;
    let token = app.login("auditor@x.com", "secret1").await;

    let list = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);

    let create = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "email": "other@x.com", "password": "secret1", "name": "Other" })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_revoked_permission_applies_to_existing_access_token() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;

    let role_id = create_role(&app, &admin, "reader").await;
    let read = permission_id(&app, &admin, "roles:read").await;
    app.request(
        "POST",
        &format!("/api/roles/{role_id}/permissions"),
        Some(json!({ "permission_id": read })),
        Some(&admin),
    )
    .await;
    create_user_with_role(&app, &admin, "reader@x.com", role_id).await;
    let token = app.login("reader@x.com", "secret1").await;

    let before = app.request("GET", "/api/roles", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let removed = app
        .request(
            "DELETE",
            &format!("/api/roles/{role_id}/permissions/{read}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let after = app.request("GET", "/api/roles", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_assignment_and_missing_assignment() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;
    let role_id = create_role(&app, &admin, "editor").await;
    let update = permission_id(&app, &admin, "users:update").await;
    let body = Some(json!({ "permission_id": update }));
    let path = format!("/api/roles/{role_id}/permissions");

    let first = app.request("POST", &path, body.clone(), Some(&admin)).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request("POST", &path, body, Some(&admin)).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), "ASSIGNMENT_CONFLICT");

    let delete = permission_id(&app, &admin, "users:delete").await;
    let missing = app
        .request(
            "DELETE",
            &format!("/api/roles/{role_id}/permissions/{delete}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_and_permission_name_conflicts() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;

    let role = app
        .request("POST", "/api/roles", Some(json!({ "name": "admin" })), Some(&admin))
        .await;
    assert_eq!(role.status, StatusCode::CONFLICT);
    assert_eq!(role.error_code(), "ROLE_NAME_TAKEN");

    let permission = app
        .request(
            "POST",
            "/api/permissions",
            Some(json!({ "name": "users:read", "resource": "users", "action": "read" })),
            Some(&admin),
        )
        .await;
    assert_eq!(permission.status, StatusCode::CONFLICT);
    assert_eq!(permission.error_code(), "PERMISSION_NAME_TAKEN");
}

#[tokio::test]
async fn test_permission_crud() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/api/permissions",
            Some(json!({
                "name": "reports:read",
                "resource": "reports",
                "action": "read",
                "description": "Read reports",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.id();

    let updated = app
        .request(
            "PATCH",
            &format!("/api/permissions/{id}"),
            Some(json!({ "description": "Read all reports" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["description"], "Read all reports");
    assert_eq!(updated.body["data"]["name"], "reports:read");

    let deleted = app
        .request("DELETE", &format!("/api/permissions/{id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/permissions/{id}"), None, Some(&admin))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detaching_role_removes_its_permissions() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;

    let role_id = create_role(&app, &admin, "viewer").await;
    let read = permission_id(&app, &admin, "users:read").await;
    app.request(
        "POST",
        &format!("/api/roles/{role_id}/permissions"),
        Some(json!({ "permission_id": read })),
        Some(&admin),
    )
    .await;
    let user_id = create_user_with_role(&app, &admin, "viewer@x.com", role_id).await;
    let token = app.login("viewer@x.com", "secret1").await;

    let before = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let renamed = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(json!({ "name": "Renamed" })),
            Some(&admin),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["role_id"], json!(role_id));

    let detached = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(json!({ "role_id": null })),
            Some(&admin),
        )
        .await;
    assert_eq!(detached.status, StatusCode::OK, "{:?}", detached.body);
    assert_eq!(detached.body["data"]["role_id"], Value::Null);

    let after = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
    assert_eq!(after.error_code(), "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_deactivated_user_access_token_is_rejected() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;
    let user_id = app.register("gone@x.com", "secret1", "Gone").await;
    let token = app.login("gone@x.com", "secret1").await;

    let deactivated = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(json!({ "is_active": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(deactivated.status, StatusCode::OK);
    assert_eq!(deactivated.body["data"]["is_active"], Value::Bool(false));

    let profile = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "gone@x.com", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(login.error_code(), "ACCOUNT_INACTIVE");
}

#[tokio::test]
async fn test_malformed_and_unknown_ids() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token().await;

    let malformed = app
        .request("GET", "/api/users/not-a-uuid", None, Some(&admin))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request("GET", &format!("/api/users/{}", Uuid::new_v4()), None, Some(&admin))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error_code(), "USER_NOT_FOUND");
}
