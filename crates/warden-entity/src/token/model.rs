//! Refresh token ledger row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A one-time-use session credential.
///
/// Rows are never deleted by the auth core; revoked rows stay behind as
/// history so that reuse surfaces as `TokenRevoked`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique row identifier.
    pub id: Uuid,
    /// Opaque token value handed to the client.
    #[serde(skip_serializing, default)]
    pub token: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Set once, never cleared.
    pub revoked: bool,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether the token is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Data for persisting a freshly issued refresh token.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    /// Opaque token value.
    pub token: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}
