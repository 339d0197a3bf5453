//! Role entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::permission::Permission;

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A role with its permissions resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDetail {
    /// The role row.
    #[serde(flatten)]
    pub role: Role,
    /// Permissions assigned to the role, no duplicates.
    pub permissions: Vec<Permission>,
}

impl RoleDetail {
    /// Names of all permissions in this role.
    pub fn permission_names(&self) -> HashSet<String> {
        self.permissions.iter().map(|p| p.name.clone()).collect()
    }

    /// Whether the permission with `permission_id` is assigned.
    pub fn has_permission_id(&self, permission_id: Uuid) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }
}

/// Data required to create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Role name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

/// Partial role update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}
