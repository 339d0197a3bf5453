//! Access + refresh token pair returned by login and refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A freshly minted token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed short-lived access token.
    pub access_token: String,
    /// Opaque long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}
