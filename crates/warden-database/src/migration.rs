//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use warden_core::error::{AppError, ErrorKind};

/// Applies every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database schema is up to date");
    Ok(())
}
