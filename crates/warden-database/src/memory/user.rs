use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::user::{CreateUser, UpdateUser, User, UserWithRole};

use super::{MemoryStore, Tables};
use crate::repositories::UserRepository;

fn with_role(tables: &Tables, user: &User) -> UserWithRole {
    UserWithRole {
        user: user.clone(),
        role: user.role_id.and_then(|id| tables.role_detail(id)),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_with_role_permissions(&self, id: Uuid) -> AppResult<Option<UserWithRole>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.get(&id).map(|u| with_role(&tables, u)))
    }

    async fn find_by_email_with_role_permissions(
        &self,
        email: &str,
    ) -> AppResult<Option<UserWithRole>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email == email)
            .map(|u| with_role(&tables, u)))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.lock().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.lock().await;

        if tables.users.values().any(|u| u.email == data.email) {
            return Err(AppError::email_taken());
        }
        if let Some(role_id) = data.role_id {
            if !tables.roles.contains_key(&role_id) {
                return Err(AppError::not_found("Role not found"));
            }
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            is_active: true,
            role_id: data.role_id,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.lock().await;

        if let Some(Some(role_id)) = data.role_id {
            if !tables.roles.contains_key(&role_id) {
                return Err(AppError::not_found("Role not found"));
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            user.name = name.clone();
        }
        if let Some(hash) = &data.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(active) = data.is_active {
            user.is_active = active;
        }
        if let Some(role_id) = data.role_id {
            user.role_id = role_id;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.refresh_tokens.retain(|_, t| t.user_id != id);
        Ok(true)
    }
}
