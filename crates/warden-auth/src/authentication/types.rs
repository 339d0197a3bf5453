//! Results returned by authentication flows.

use serde::{Deserialize, Serialize};

use warden_entity::token::TokenPair;
use warden_entity::user::UserProfile;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// The authenticated user, with role and permissions resolved.
    pub user: UserProfile,
    /// Freshly issued tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
}
