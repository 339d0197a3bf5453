//! Access token signing.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_entity::user::User;

use super::claims::Claims;

/// Signs HS256 access tokens with a fixed lifetime.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl_minutes: u64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_token_ttl_minutes,
        }
    }

    /// Signs an access token for `user`, issued at `now`.
    ///
    /// A lifetime that overflows the calendar is a `Configuration` error.
    pub fn encode_access_token(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let expires_at = i64::try_from(self.access_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::configuration("Access token lifetime is out of range"))?;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role_id: user.role_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, expires_at))
    }
}
