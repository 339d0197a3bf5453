//! Persisted refresh tokens with single-use rotation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use warden_core::error::AppError;
use warden_database::repositories::RefreshTokenRepository;
use warden_entity::token::{NewRefreshToken, RefreshToken};

/// Record of every issued refresh token.
///
/// A row moves from unrevoked to revoked exactly once and never back.
#[derive(Clone)]
pub struct RefreshTokenLedger {
    repo: Arc<dyn RefreshTokenRepository>,
}

impl std::fmt::Debug for RefreshTokenLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenLedger").finish_non_exhaustive()
    }
}

impl RefreshTokenLedger {
    /// Creates a ledger over the given storage.
    pub fn new(repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { repo }
    }

    /// Finds a token by its opaque value.
    pub async fn lookup(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        self.repo.find_by_token(token).await
    }

    /// Inserts a newly issued token.
    pub async fn persist(&self, record: NewRefreshToken) -> Result<RefreshToken, AppError> {
        self.repo.create(&record).await
    }

    /// Marks a token revoked. Revoking twice is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.repo.revoke_by_token(token).await
    }

    /// Revokes every live token owned by `user_id`.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let revoked = self.repo.revoke_all_for_user(user_id).await?;
        debug!(user_id = %user_id, revoked, "Revoked refresh tokens");
        Ok(revoked)
    }

    /// Validates `token` at `now` and atomically revokes it.
    ///
    /// Fails with `InvalidToken` if unknown, `TokenRevoked` if already
    /// revoked (including losing a concurrent rotation), and `TokenExpired`
    /// if past its expiry. On success the returned record is already
    /// revoked in storage, so any later failure leaves the session closed.
    pub async fn consume(&self, token: &str, now: DateTime<Utc>) -> Result<RefreshToken, AppError> {
        let record = self
            .lookup(token)
            .await?
            .ok_or_else(AppError::invalid_token)?;

        if record.revoked {
            warn!(user_id = %record.user_id, token_id = %record.id, "Revoked refresh token presented");
            return Err(AppError::token_revoked());
        }
        if record.is_expired_at(now) {
            return Err(AppError::token_expired());
        }

        if !self.repo.revoke_if_active(record.id).await? {
            warn!(user_id = %record.user_id, token_id = %record.id, "Lost refresh token rotation race");
            return Err(AppError::token_revoked());
        }

        Ok(RefreshToken {
            revoked: true,
            ..record
        })
    }
}
