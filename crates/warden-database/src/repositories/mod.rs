//! Repository traits and their PostgreSQL implementations.
//!
//! Each trait states exactly which related rows a method resolves, so
//! callers never depend on implicit eager loading.

pub mod permission;
pub mod refresh_token;
pub mod role;
pub mod user;

use std::sync::Arc;

use sqlx::PgPool;

use warden_core::error::{AppError, ErrorKind};

use crate::memory::MemoryStore;

pub use permission::{PermissionRepository, PgPermissionRepository};
pub use refresh_token::{PgRefreshTokenRepository, RefreshTokenRepository};
pub use role::{PgRoleRepository, RoleRepository};
pub use user::{PgUserRepository, UserRepository};

/// The full set of repositories, type-erased behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Roles and role-permission assignments.
    pub roles: Arc<dyn RoleRepository>,
    /// Permission catalogue.
    pub permissions: Arc<dyn PermissionRepository>,
    /// Refresh token ledger storage.
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            roles: Arc::new(PgRoleRepository::new(pool.clone())),
            permissions: Arc::new(PgPermissionRepository::new(pool.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenRepository::new(pool)),
        }
    }

    /// Repositories that all read and write the same in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            roles: Arc::new(store.clone()),
            permissions: Arc::new(store.clone()),
            refresh_tokens: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Name of the violated constraint, if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => db_err.constraint(),
        _ => None,
    }
}

/// Whether `err` is a foreign-key violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

/// Wraps an sqlx error as an opaque database failure.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
