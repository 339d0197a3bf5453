//! `AuthUser` extractor: pulls the bearer access token from the Authorization
//! header, validates it, and resolves the caller's current permissions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use warden_auth::rbac::Principal;
use warden_core::error::AppError;
use warden_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        // Permissions are resolved per request so role changes apply before
        // the access token expires.
        let resolved = state
            .repos
            .users
            .find_with_role_permissions(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthenticated("Unknown user"))?;

        if !resolved.user.is_active {
            debug!(user_id = %resolved.user.id, "Access token presented for inactive user");
            return Err(AppError::unauthenticated("User account is inactive"));
        }

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ctx = RequestContext::new(Principal::from(&resolved), ip_address, user_agent);

        Ok(AuthUser(ctx))
    }
}
