//! Access token validation.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::traits::Clock;

use super::claims::Claims;

/// Clock skew tolerated when checking `exp`.
const EXPIRY_LEEWAY_SECONDS: i64 = 5;

/// Verifies signature and expiry of access tokens.
///
/// Expiry is judged against the injected [`Clock`], the same one the
/// encoder stamps `iat` and `exp` with.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Every failure is `Unauthenticated`; the message names the reason.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => {
                    AppError::unauthenticated("Invalid access token signature")
                }
                _ => AppError::unauthenticated("Invalid access token"),
            })?;

        let expires_at = claims
            .expires_at()
            .ok_or_else(|| AppError::unauthenticated("Invalid access token"))?;
        if expires_at + Duration::seconds(EXPIRY_LEEWAY_SECONDS) <= self.clock.now() {
            return Err(AppError::unauthenticated("Access token has expired"));
        }

        Ok(claims)
    }
}
