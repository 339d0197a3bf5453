//! Integration tests for the authentication flow.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_strips_password_hash() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "a@x.com", "password": "secret1", "name": "A" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["email"], "a@x.com");
    assert_eq!(data["name"], "A");
    assert!(data.get("password_hash").is_none());
    assert!(data.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = helpers::TestApp::new().await;
    app.register("dup@x.com", "secret1", "First").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "dup@x.com", "password": "secret2", "name": "Second" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "EMAIL_TAKEN");
}

#[tokio::test]
async fn test_register_rejects_invalid_body() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "not-an-email", "password": "123", "name": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let app = helpers::TestApp::new().await;
    app.register("a@x.com", "secret1", "A").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "a@x.com", "password": "wrong1" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@x.com", "password": "secret1" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_login_returns_token_pair_and_user() {
    let app = helpers::TestApp::new().await;
    app.register("a@x.com", "secret1", "A").await;

    let payload = app.login_payload("a@x.com", "secret1").await;

    assert!(payload["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(payload["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(payload["access_expires_at"].is_string());
    assert!(payload["refresh_expires_at"].is_string());
    assert_eq!(payload["user"]["email"], "a@x.com");
    assert!(payload["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_refresh_rotates_and_rejects_reuse() {
    let app = helpers::TestApp::new().await;
    app.register("a@x.com", "secret1", "A").await;
    let payload = app.login_payload("a@x.com", "secret1").await;
    let old_refresh = payload["refresh_token"].as_str().expect("refresh token");

    let rotated = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": old_refresh })),
            None,
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let new_refresh = rotated.body["data"]["refresh_token"]
        .as_str()
        .expect("new refresh token");
    assert_ne!(new_refresh, old_refresh);

    let reused = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": old_refresh })),
            None,
        )
        .await;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reused.error_code(), "TOKEN_REVOKED");

    // Reuse of the old token does not take the replacement down with it.
    let next = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": new_refresh })),
            None,
        )
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_unknown_token() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": "does-not-exist" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_logout_revokes_every_refresh_token() {
    let app = helpers::TestApp::new().await;
    app.register("a@x.com", "secret1", "A").await;
    let first = app.login_payload("a@x.com", "secret1").await;
    let second = app.login_payload("a@x.com", "secret1").await;
    let access = first["access_token"].as_str().expect("access token");

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(access))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    for payload in [&first, &second] {
        let response = app
            .request(
                "POST",
                "/api/auth/refresh",
                Some(json!({ "refresh_token": payload["refresh_token"] })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error_code(), "TOKEN_REVOKED");
    }
}

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let app = helpers::TestApp::new().await;

    let missing = app.request("GET", "/api/auth/profile", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHENTICATED");

    let garbage = app
        .request("GET", "/api/auth/profile", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_profile_lists_role_permissions() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["email"], helpers::ADMIN_EMAIL);
    assert_eq!(data["role"]["name"], "admin");
    let permissions = data["role"]["permissions"]
        .as_array()
        .expect("permissions array");
    assert!(permissions.iter().any(|p| p["name"] == "roles:assign-permission"));
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "memory");
}
