use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::permission::{CreatePermission, Permission, UpdatePermission};

use super::MemoryStore;
use crate::repositories::PermissionRepository;

#[async_trait]
impl PermissionRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        Ok(self.tables.lock().await.permissions.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        let tables = self.tables.lock().await;
        Ok(tables.permissions.values().find(|p| p.name == name).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Permission>> {
        let tables = self.tables.lock().await;
        let mut permissions: Vec<Permission> = tables.permissions.values().cloned().collect();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(permissions)
    }

    async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        let mut tables = self.tables.lock().await;
        if tables.permissions.values().any(|p| p.name == data.name) {
            return Err(AppError::permission_name_taken());
        }

        let now = Utc::now();
        let permission = Permission {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            resource: data.resource.clone(),
            action: data.action.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Option<Permission>> {
        let mut tables = self.tables.lock().await;
        if let Some(name) = &data.name {
            if tables.permissions.values().any(|p| p.id != id && &p.name == name) {
                return Err(AppError::permission_name_taken());
            }
        }

        let Some(permission) = tables.permissions.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            permission.name = name.clone();
        }
        if let Some(description) = &data.description {
            permission.description = Some(description.clone());
        }
        if let Some(resource) = &data.resource {
            permission.resource = resource.clone();
        }
        if let Some(action) = &data.action {
            permission.action = action.clone();
        }
        permission.updated_at = Utc::now();
        Ok(Some(permission.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.permissions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.role_permissions.retain(|(_, permission_id)| *permission_id != id);
        Ok(true)
    }
}
