use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::role::{CreateRole, Role, RoleDetail, UpdateRole};

use super::MemoryStore;
use crate::repositories::RoleRepository;

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.tables.lock().await.roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let tables = self.tables.lock().await;
        Ok(tables.roles.values().find(|r| r.name == name).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<RoleDetail>> {
        Ok(self.tables.lock().await.role_detail(id))
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let tables = self.tables.lock().await;
        let mut roles: Vec<Role> = tables.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        let mut tables = self.tables.lock().await;
        if tables.roles.values().any(|r| r.name == data.name) {
            return Err(AppError::role_name_taken());
        }

        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Option<Role>> {
        let mut tables = self.tables.lock().await;
        if let Some(name) = &data.name {
            if tables.roles.values().any(|r| r.id != id && &r.name == name) {
                return Err(AppError::role_name_taken());
            }
        }

        let Some(role) = tables.roles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            role.name = name.clone();
        }
        if let Some(description) = &data.description {
            role.description = Some(description.clone());
        }
        role.updated_at = Utc::now();
        Ok(Some(role.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.roles.remove(&id).is_none() {
            return Ok(false);
        }
        tables.role_permissions.retain(|(role_id, _)| *role_id != id);
        for user in tables.users.values_mut() {
            if user.role_id == Some(id) {
                user.role_id = None;
            }
        }
        Ok(true)
    }

    async fn add_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.roles.contains_key(&role_id) || !tables.permissions.contains_key(&permission_id) {
            return Err(AppError::not_found("Role or permission not found"));
        }
        if !tables.role_permissions.insert((role_id, permission_id)) {
            return Err(AppError::assignment_conflict(
                "Permission already assigned to this role",
            ));
        }
        Ok(())
    }

    async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        Ok(tables.role_permissions.remove(&(role_id, permission_id)))
    }
}
