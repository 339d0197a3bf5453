//! PostgreSQL connection pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use warden_core::config::DatabaseConfig;
use warden_core::error::{AppError, ErrorKind};

use crate::migration;

/// Shared handle to the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens a pool sized and timed according to `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Opening PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Applies embedded migrations to this pool.
    pub async fn migrate(&self) -> Result<(), AppError> {
        migration::run_migrations(&self.pool).await
    }

    /// Borrow the sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips `SELECT 1`.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

/// Replaces the password in a connection URL with `****`.
fn redact_url(url: &str) -> String {
    let Some(at) = url.rfind('@') else {
        return url.to_string();
    };
    let start = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[start..at].find(':') {
        Some(colon) => format!("{}:****{}", &url[..start + colon], &url[at..]),
        None => url.to_string(),
    }
}
