//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use warden_auth::password::CredentialStore;
use warden_core::config::{AppConfig, AuthConfig, BootstrapConfig};
use warden_core::traits::SystemClock;
use warden_database::{MemoryStore, Repositories};

pub const ADMIN_EMAIL: &str = "admin@warden.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repositories behind the router, for direct setup
    pub repos: Repositories,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application on a seeded in-memory store, with a
    /// bootstrap admin account.
    pub async fn new() -> Self {
        let config = test_config();
        let repos = Repositories::memory(MemoryStore::seeded());

        let credentials = CredentialStore::new(&config.auth).expect("credential store");
        warden_service::bootstrap::ensure_admin(&config.bootstrap, &repos, &credentials)
            .await
            .expect("bootstrap admin")
            .expect("admin created");

        let state = warden_api::AppState::new(
            config.clone(),
            None,
            repos.clone(),
            Arc::new(SystemClock),
        )
        .expect("app state");

        Self {
            router: warden_api::build_app(state),
            repos,
            config,
        }
    }

    /// Registers a user through the API and returns its ID.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({ "email": email, "password": password, "name": name })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Logs in and returns the whole login payload.
    pub async fn login_payload(&self, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// Logs in and returns the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        self.login_payload(email, password).await["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    /// Access token of the bootstrap admin.
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Send a request to the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// `data.id` of a success body.
    pub fn id(&self) -> Uuid {
        self.body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("data.id")
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: Default::default(),
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            kdf_memory_kib: 1024,
            kdf_iterations: 1,
            ..AuthConfig::default()
        },
        logging: Default::default(),
        bootstrap: BootstrapConfig {
            admin_email: Some(ADMIN_EMAIL.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            ..BootstrapConfig::default()
        },
    }
}
