//! Mints access + refresh token pairs.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::traits::Clock;
use warden_entity::token::{NewRefreshToken, RefreshToken, TokenPair};
use warden_entity::user::User;

use super::ledger::RefreshTokenLedger;
use crate::jwt::JwtEncoder;

/// Issues a stateless access token and a persisted refresh token.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    encoder: JwtEncoder,
    ledger: RefreshTokenLedger,
    clock: Arc<dyn Clock>,
    refresh_ttl_days: u64,
}

impl TokenIssuer {
    /// Creates an issuer that records refresh tokens in `ledger`.
    pub fn new(config: &AuthConfig, ledger: RefreshTokenLedger, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            ledger,
            clock,
            refresh_ttl_days: config.refresh_token_ttl_days,
        }
    }

    /// Signs an access token for `user`.
    pub fn issue_access_token(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        self.encoder.encode_access_token(user, self.clock.now())
    }

    /// Generates and persists a fresh refresh token for `user`.
    pub async fn issue_refresh_token(&self, user: &User) -> Result<RefreshToken, AppError> {
        let record = NewRefreshToken {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            expires_at: self.refresh_expiry(self.clock.now())?,
        };
        self.ledger.persist(record).await
    }

    fn refresh_expiry(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
        i64::try_from(self.refresh_ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::configuration("Refresh token lifetime is out of range"))
    }

    /// Issues both tokens for `user`.
    pub async fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.issue_access_token(user)?;
        let refresh = self.issue_refresh_token(user).await?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh.token,
            access_expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }
}
