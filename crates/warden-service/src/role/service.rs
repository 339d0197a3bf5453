//! Role CRUD and role-permission assignment.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_database::repositories::{PermissionRepository, RoleRepository};
use warden_entity::role::{CreateRole, Role, RoleDetail, UpdateRole};

use crate::context::RequestContext;

/// Manages roles and the permissions granted to them.
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<dyn PermissionRepository>,
}

impl std::fmt::Debug for RoleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleService").finish_non_exhaustive()
    }
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(roles: Arc<dyn RoleRepository>, permissions: Arc<dyn PermissionRepository>) -> Self {
        Self { roles, permissions }
    }

    /// Lists all roles.
    pub async fn list_roles(&self, _ctx: &RequestContext) -> Result<Vec<Role>, AppError> {
        self.roles.find_all().await
    }

    /// Gets a role with its permissions.
    pub async fn get_role(&self, _ctx: &RequestContext, role_id: Uuid) -> Result<RoleDetail, AppError> {
        self.detail(role_id).await
    }

    /// Creates a role with no permissions.
    pub async fn create_role(&self, ctx: &RequestContext, data: CreateRole) -> Result<Role, AppError> {
        if self.roles.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::role_name_taken());
        }

        let role = self.roles.create(&data).await?;
        info!(actor_id = %ctx.user_id(), role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Renames or re-describes a role.
    pub async fn update_role(
        &self,
        ctx: &RequestContext,
        role_id: Uuid,
        data: UpdateRole,
    ) -> Result<Role, AppError> {
        let current = self.find(role_id).await?;

        if let Some(name) = data.name.as_deref().filter(|n| *n != current.name) {
            if self.roles.find_by_name(name).await?.is_some() {
                return Err(AppError::role_name_taken());
            }
        }

        let role = self
            .roles
            .update(role_id, &data)
            .await?
            .ok_or_else(|| role_not_found(role_id))?;
        info!(actor_id = %ctx.user_id(), role_id = %role.id, "Role updated");
        Ok(role)
    }

    /// Deletes a role. Users that held it are left without a role.
    pub async fn delete_role(&self, ctx: &RequestContext, role_id: Uuid) -> Result<(), AppError> {
        if !self.roles.delete(role_id).await? {
            return Err(role_not_found(role_id));
        }
        info!(actor_id = %ctx.user_id(), role_id = %role_id, "Role deleted");
        Ok(())
    }

    /// Grants `permission_id` to `role_id`.
    pub async fn assign_permission(
        &self,
        ctx: &RequestContext,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<RoleDetail, AppError> {
        let role = self.detail(role_id).await?;
        if self.permissions.find_by_id(permission_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Permission with ID \"{permission_id}\" not found"
            )));
        }
        if role.has_permission_id(permission_id) {
            return Err(AppError::assignment_conflict(
                "Permission already assigned to this role",
            ));
        }

        self.roles.add_permission(role_id, permission_id).await?;
        info!(
            actor_id = %ctx.user_id(),
            role_id = %role_id,
            permission_id = %permission_id,
            "Permission assigned to role"
        );
        self.detail(role_id).await
    }

    /// Revokes `permission_id` from `role_id`.
    pub async fn remove_permission(
        &self,
        ctx: &RequestContext,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AppError> {
        self.find(role_id).await?;
        if !self.roles.remove_permission(role_id, permission_id).await? {
            return Err(AppError::not_found("Permission not assigned to this role"));
        }
        info!(
            actor_id = %ctx.user_id(),
            role_id = %role_id,
            permission_id = %permission_id,
            "Permission removed from role"
        );
        Ok(())
    }

    async fn find(&self, role_id: Uuid) -> Result<Role, AppError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| role_not_found(role_id))
    }

    async fn detail(&self, role_id: Uuid) -> Result<RoleDetail, AppError> {
        self.roles
            .find_detail(role_id)
            .await?
            .ok_or_else(|| role_not_found(role_id))
    }
}

fn role_not_found(role_id: Uuid) -> AppError {
    AppError::not_found(format!("Role with ID \"{role_id}\" not found"))
}
