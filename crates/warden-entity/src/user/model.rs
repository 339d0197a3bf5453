//! User entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::role::RoleDetail;

use super::profile::UserProfile;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email address, case-sensitive as stored.
    pub email: String,
    /// Stored credential in `salt:derivedKeyHex` form.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Whether the account may log in.
    pub is_active: bool,
    /// The role this user belongs to, if any.
    pub role_id: Option<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Assigned role (optional).
    pub role_id: Option<Uuid>,
}

/// Partial user update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name.
    pub name: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New role assignment. `Some(None)` detaches the current role.
    #[serde(
        default,
        deserialize_with = "crate::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_id: Option<Option<Uuid>>,
}

/// A user together with its role and that role's permissions.
#[derive(Debug, Clone)]
pub struct UserWithRole {
    /// The user row.
    pub user: User,
    /// The resolved role, if the user has one.
    pub role: Option<RoleDetail>,
}

impl UserWithRole {
    /// Names of every permission granted through the user's role.
    pub fn permission_names(&self) -> HashSet<String> {
        self.role
            .as_ref()
            .map(RoleDetail::permission_names)
            .unwrap_or_default()
    }

    /// Converts into the outward profile view.
    pub fn into_profile(self) -> UserProfile {
        UserProfile::new(self.user, self.role)
    }
}
