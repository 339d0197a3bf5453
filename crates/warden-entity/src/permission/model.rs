//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An atomic capability, named `resource:action` by convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Globally unique name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Resource the permission applies to.
    pub resource: String,
    /// Action on the resource.
    pub action: String,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
    /// When the permission was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// Permission name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Resource.
    pub resource: String,
    /// Action.
    pub action: String,
}

/// Partial permission update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePermission {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New resource.
    pub resource: Option<String>,
    /// New action.
    pub action: Option<String>,
}
