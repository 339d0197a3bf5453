//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use warden_auth::jwt::JwtDecoder;
use warden_auth::password::{CredentialStore, PasswordValidator};
use warden_auth::rbac::PermissionEvaluator;
use warden_auth::AuthenticationService;
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_core::traits::Clock;
use warden_database::{DatabasePool, Repositories};
use warden_service::{AdminUserService, PermissionService, RoleService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on the in-memory store
    pub database: Option<DatabasePool>,
    /// Repository bundle every service reads through
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Register, login, refresh, logout, profile
    pub auth: Arc<AuthenticationService>,
    /// Access token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Operation permission checks
    pub evaluator: PermissionEvaluator,

    // ── Administration ───────────────────────────────────────
    /// User management
    pub admin_user_service: Arc<AdminUserService>,
    /// Role management
    pub role_service: Arc<RoleService>,
    /// Permission management
    pub permission_service: Arc<PermissionService>,
}

impl AppState {
    /// Wires every service from configuration, repositories, and a clock.
    pub fn new(
        config: AppConfig,
        database: Option<DatabasePool>,
        repos: Repositories,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let credentials = CredentialStore::new(&config.auth)?;

        let auth = AuthenticationService::new(
            &config.auth,
            Arc::clone(&repos.users),
            Arc::clone(&repos.refresh_tokens),
            credentials.clone(),
            Arc::clone(&clock),
        );

        let admin_user_service = AdminUserService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.roles),
            credentials,
            PasswordValidator::new(&config.auth),
        );
        let role_service = RoleService::new(Arc::clone(&repos.roles), Arc::clone(&repos.permissions));
        let permission_service = PermissionService::new(Arc::clone(&repos.permissions));

        Ok(Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth, clock)),
            config: Arc::new(config),
            database,
            repos,
            auth: Arc::new(auth),
            evaluator: PermissionEvaluator::new(),
            admin_user_service: Arc::new(admin_user_service),
            role_service: Arc::new(role_service),
            permission_service: Arc::new(permission_service),
        })
    }
}
