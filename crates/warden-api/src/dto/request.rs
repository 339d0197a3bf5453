//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use warden_entity::permission::{CreatePermission, UpdatePermission};
use warden_entity::role::{CreateRole, UpdateRole};
use warden_service::user::{
    CreateUserRequest as CreateUserCommand, UpdateUserRequest as UpdateUserCommand,
};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Role to bind the user to.
    pub role_id: Option<Uuid>,
}

impl From<CreateUserRequest> for CreateUserCommand {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
            role_id: req.role_id,
        }
    }
}

/// Update user request (admin).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    /// New password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    /// Enable or disable the account.
    pub is_active: Option<bool>,
    /// New role; `null` detaches the current one.
    #[serde(
        default,
        deserialize_with = "warden_entity::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_id: Option<Option<Uuid>>,
}

impl From<UpdateUserRequest> for UpdateUserCommand {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            password: req.password,
            is_active: req.is_active,
            role_id: req.role_id,
        }
    }
}

/// Create role request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Role name.
    #[validate(length(min = 1, max = 100, message = "Role name is required"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

impl From<CreateRoleRequest> for CreateRole {
    fn from(req: CreateRoleRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Update role request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// New name.
    #[validate(length(min = 1, max = 100, message = "Role name must not be empty"))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl From<UpdateRoleRequest> for UpdateRole {
    fn from(req: UpdateRoleRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Assign a permission to a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignPermissionRequest {
    /// Permission to grant.
    pub permission_id: Uuid,
}

/// Create permission request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    /// Unique name, conventionally `resource:action`.
    #[validate(length(min = 1, max = 100, message = "Permission name is required"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Resource the permission governs.
    #[validate(length(min = 1, message = "Resource is required"))]
    pub resource: String,
    /// Action on the resource.
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}

impl From<CreatePermissionRequest> for CreatePermission {
    fn from(req: CreatePermissionRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            resource: req.resource,
            action: req.action,
        }
    }
}

/// Update permission request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePermissionRequest {
    /// New name.
    #[validate(length(min = 1, max = 100, message = "Permission name must not be empty"))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New resource.
    #[validate(length(min = 1, message = "Resource must not be empty"))]
    pub resource: Option<String>,
    /// New action.
    #[validate(length(min = 1, message = "Action must not be empty"))]
    pub action: Option<String>,
}

impl From<UpdatePermissionRequest> for UpdatePermission {
    fn from(req: UpdatePermissionRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            resource: req.resource,
            action: req.action,
        }
    }
}
