//! The authenticated caller and its resolved permissions.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use warden_entity::user::UserWithRole;

/// An authenticated user with the permission names granted through its role.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    /// User ID.
    pub user_id: Uuid,
    /// Email address.
    pub email: String,
    /// Role ID, if any.
    pub role_id: Option<Uuid>,
    /// Names of every granted permission.
    pub permissions: HashSet<String>,
}

impl From<&UserWithRole> for Principal {
    fn from(resolved: &UserWithRole) -> Self {
        Self {
            user_id: resolved.user.id,
            email: resolved.user.email.clone(),
            role_id: resolved.user.role_id,
            permissions: resolved.permission_names(),
        }
    }
}
