//! Outward user view with the credential stripped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::RoleDetail;

use super::model::User;

/// A user as returned to callers. Carries no password material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Role ID, if any.
    pub role_id: Option<Uuid>,
    /// Resolved role with permissions, when loaded.
    pub role: Option<RoleDetail>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds a profile from a user row and its optional resolved role.
    pub fn new(user: User, role: Option<RoleDetail>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            role_id: user.role_id,
            role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self::new(user, None)
    }
}
