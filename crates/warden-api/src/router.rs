//! Route definitions for the Warden HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{delete, get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route, without outer layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(role_routes())
        .merge(permission_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/profile", get(handlers::auth::profile))
}

/// User administration
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .patch(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

/// Roles and role-permission assignment
fn role_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/roles",
            get(handlers::role::list_roles).post(handlers::role::create_role),
        )
        .route(
            "/roles/{id}",
            get(handlers::role::get_role)
                .patch(handlers::role::update_role)
                .delete(handlers::role::delete_role),
        )
        .route(
            "/roles/{id}/permissions",
            post(handlers::role::assign_permission),
        )
        .route(
            "/roles/{id}/permissions/{permission_id}",
            delete(handlers::role::remove_permission),
        )
}

/// Permission catalogue
fn permission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/permissions",
            get(handlers::permission::list_permissions)
                .post(handlers::permission::create_permission),
        )
        .route(
            "/permissions/{id}",
            get(handlers::permission::get_permission)
                .patch(handlers::permission::update_permission)
                .delete(handlers::permission::delete_permission),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use warden_core::config::{AppConfig, AuthConfig};
    use warden_core::traits::SystemClock;
    use warden_database::{MemoryStore, Repositories};

    use super::*;

    fn state() -> AppState {
        let config = AppConfig {
            server: Default::default(),
            database: Default::default(),
            auth: AuthConfig {
                kdf_memory_kib: 1024,
                kdf_iterations: 1,
                ..AuthConfig::default()
            },
            logging: Default::default(),
            bootstrap: Default::default(),
        };
        let repos = Repositories::memory(MemoryStore::seeded());
        AppState::new(config, None, repos, Arc::new(SystemClock)).unwrap()
    }

    async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (status, body) = send(build_router(state()), "GET", "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        for uri in ["/api/users", "/api/roles", "/api/permissions", "/api/auth/profile"] {
            let (status, body) = send(build_router(state()), "GET", uri).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body["error"], "UNAUTHENTICATED");
        }
    }

    #[tokio::test]
    async fn test_logout_is_post_only() {
        let (status, _) = send(build_router(state()), "GET", "/api/auth/logout").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
