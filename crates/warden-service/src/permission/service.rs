//! Permission catalogue CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_database::repositories::PermissionRepository;
use warden_entity::permission::{CreatePermission, Permission, UpdatePermission};

use crate::context::RequestContext;

/// Manages the set of named permissions.
#[derive(Clone)]
pub struct PermissionService {
    permissions: Arc<dyn PermissionRepository>,
}

impl std::fmt::Debug for PermissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionService").finish_non_exhaustive()
    }
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(permissions: Arc<dyn PermissionRepository>) -> Self {
        Self { permissions }
    }

    /// Lists all permissions.
    pub async fn list_permissions(&self, _ctx: &RequestContext) -> Result<Vec<Permission>, AppError> {
        self.permissions.find_all().await
    }

    /// Gets a single permission.
    pub async fn get_permission(
        &self,
        _ctx: &RequestContext,
        permission_id: Uuid,
    ) -> Result<Permission, AppError> {
        self.find(permission_id).await
    }

    /// Creates a permission.
    pub async fn create_permission(
        &self,
        ctx: &RequestContext,
        data: CreatePermission,
    ) -> Result<Permission, AppError> {
        if self.permissions.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::permission_name_taken());
        }

        let permission = self.permissions.create(&data).await?;
        info!(
            actor_id = %ctx.user_id(),
            permission_id = %permission.id,
            name = %permission.name,
            "Permission created"
        );
        Ok(permission)
    }

    /// Updates a permission.
    pub async fn update_permission(
        &self,
        ctx: &RequestContext,
        permission_id: Uuid,
        data: UpdatePermission,
    ) -> Result<Permission, AppError> {
        let current = self.find(permission_id).await?;

        if let Some(name) = data.name.as_deref().filter(|n| *n != current.name) {
            if self.permissions.find_by_name(name).await?.is_some() {
                return Err(AppError::permission_name_taken());
            }
        }

        let permission = self
            .permissions
            .update(permission_id, &data)
            .await?
            .ok_or_else(|| permission_not_found(permission_id))?;
        info!(actor_id = %ctx.user_id(), permission_id = %permission.id, "Permission updated");
        Ok(permission)
    }

    /// Deletes a permission and removes it from every role.
    pub async fn delete_permission(
        &self,
        ctx: &RequestContext,
        permission_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.permissions.delete(permission_id).await? {
            return Err(permission_not_found(permission_id));
        }
        info!(actor_id = %ctx.user_id(), permission_id = %permission_id, "Permission deleted");
        Ok(())
    }

    async fn find(&self, permission_id: Uuid) -> Result<Permission, AppError> {
        self.permissions
            .find_by_id(permission_id)
            .await?
            .ok_or_else(|| permission_not_found(permission_id))
    }
}

fn permission_not_found(permission_id: Uuid) -> AppError {
    AppError::not_found(format!("Permission with ID \"{permission_id}\" not found"))
}
