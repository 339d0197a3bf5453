//! Required permissions for every protected operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every operation exposed at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    // Authentication
    /// Create an account.
    Register,
    /// Exchange credentials for tokens.
    Login,
    /// Rotate a refresh token.
    Refresh,
    /// Revoke the caller's refresh tokens.
    Logout,
    /// Read the caller's own profile.
    GetProfile,

    // Users
    /// List users.
    ListUsers,
    /// Read one user.
    GetUser,
    /// Create a user.
    CreateUser,
    /// Update a user.
    UpdateUser,
    /// Delete a user.
    DeleteUser,

    // Roles
    /// List roles.
    ListRoles,
    /// Read one role.
    GetRole,
    /// Create a role.
    CreateRole,
    /// Update a role.
    UpdateRole,
    /// Delete a role.
    DeleteRole,
    /// Grant a permission to a role.
    AssignRolePermission,
    /// Revoke a permission from a role.
    RemoveRolePermission,

    // Permissions
    /// List permissions.
    ListPermissions,
    /// Read one permission.
    GetPermission,
    /// Create a permission.
    CreatePermission,
    /// Update a permission.
    UpdatePermission,
    /// Delete a permission.
    DeletePermission,
}

impl Operation {
    /// Permission names a caller must hold, all of them, to perform this operation.
    pub fn required_permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Register | Self::Login | Self::Refresh => &[],
            Self::Logout | Self::GetProfile => &[],
            Self::ListUsers | Self::GetUser => &["users:read"],
            Self::CreateUser => &["users:create"],
            Self::UpdateUser => &["users:update"],
            Self::DeleteUser => &["users:delete"],
            Self::ListRoles | Self::GetRole => &["roles:read"],
            Self::CreateRole => &["roles:create"],
            Self::UpdateRole => &["roles:update"],
            Self::DeleteRole => &["roles:delete"],
            Self::AssignRolePermission | Self::RemoveRolePermission => {
                &["roles:assign-permission"]
            }
            Self::ListPermissions | Self::GetPermission => &["permissions:read"],
            Self::CreatePermission => &["permissions:create"],
            Self::UpdatePermission => &["permissions:update"],
            Self::DeletePermission => &["permissions:delete"],
        }
    }

    /// Whether the operation needs an authenticated caller at all.
    pub fn requires_principal(&self) -> bool {
        !matches!(self, Self::Register | Self::Login | Self::Refresh)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
