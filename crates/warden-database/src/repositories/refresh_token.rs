//! Refresh token storage.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use warden_core::result::AppResult;
use warden_entity::token::{NewRefreshToken, RefreshToken};

use super::db_error;

/// Storage backing the refresh token ledger.
///
/// Rows are only ever inserted or flipped to revoked; nothing here
/// deletes a token or clears the revoked flag.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new, unrevoked token.
    async fn create(&self, data: &NewRefreshToken) -> AppResult<RefreshToken>;

    /// Find a token by its opaque value.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Revoke the token with `id` only if it is still unrevoked.
    ///
    /// Returns `true` for exactly one caller when several race on the same row.
    async fn revoke_if_active(&self, id: Uuid) -> AppResult<bool>;

    /// Revoke the token with value `token`. Idempotent.
    async fn revoke_by_token(&self, token: &str) -> AppResult<()>;

    /// Revoke every unrevoked token owned by `user_id`. Returns the count revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64>;
}

/// PostgreSQL refresh token repository.
#[derive(Debug, Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn create(&self, data: &NewRefreshToken) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (token, user_id, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.token)
        .bind(data.user_id)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to persist refresh token"))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))
    }

    async fn revoke_if_active(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1 AND revoked = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke refresh token"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn revoke_by_token(&self, token: &str) -> AppResult<()> {
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE token = $1 AND revoked = FALSE")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to revoke refresh token"))?;
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke user refresh tokens"))?;
        Ok(result.rows_affected())
    }
}
