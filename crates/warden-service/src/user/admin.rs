//! Admin user management: CRUD, role assignment, activation, password resets.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use warden_auth::password::{CredentialStore, PasswordValidator};
use warden_core::error::AppError;
use warden_database::repositories::{RoleRepository, UserRepository};
use warden_entity::user::{CreateUser, UpdateUser, UserProfile};

use crate::context::RequestContext;

/// Handles administrative user management operations.
#[derive(Clone)]
pub struct AdminUserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    credentials: CredentialStore,
    validator: PasswordValidator,
}

impl std::fmt::Debug for AdminUserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserService").finish_non_exhaustive()
    }
}

/// Request to create a new user.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// Email (unique).
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Role assignment.
    pub role_id: Option<Uuid>,
}

/// Request to update a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New password, re-hashed before storage.
    pub password: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New role. `Some(None)` detaches the current one.
    #[serde(
        default,
        deserialize_with = "warden_entity::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_id: Option<Option<Uuid>>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        credentials: CredentialStore,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            roles,
            credentials,
            validator,
        }
    }

    /// Lists all users.
    pub async fn list_users(&self, _ctx: &RequestContext) -> Result<Vec<UserProfile>, AppError> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Gets a single user with its role and permissions.
    pub async fn get_user(
        &self,
        _ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<UserProfile, AppError> {
        self.users
            .find_with_role_permissions(user_id)
            .await?
            .map(|resolved| resolved.into_profile())
            .ok_or_else(AppError::user_not_found)
    }

    /// Creates a new user.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<UserProfile, AppError> {
        self.validator.validate(&req.password)?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::email_taken());
        }
        if let Some(role_id) = req.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let password_hash = self.credentials.hash(&req.password).await?;
        let user = self
            .users
            .create(&CreateUser {
                email: req.email,
                password_hash,
                name: req.name,
                role_id: req.role_id,
            })
            .await?;

        info!(
            actor_id = %ctx.user_id(),
            user_id = %user.id,
            "Admin created user"
        );

        Ok(UserProfile::from(user))
    }

    /// Updates a user's name, password, active flag, or role.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserProfile, AppError> {
        if let Some(Some(role_id)) = req.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.credentials.hash(password).await?)
            }
            None => None,
        };

        let user = self
            .users
            .update(
                user_id,
                &UpdateUser {
                    name: req.name,
                    password_hash,
                    is_active: req.is_active,
                    role_id: req.role_id,
                },
            )
            .await?
            .ok_or_else(AppError::user_not_found)?;

        info!(
            actor_id = %ctx.user_id(),
            user_id = %user.id,
            "Admin updated user"
        );

        Ok(UserProfile::from(user))
    }

    /// Deletes a user and its refresh tokens.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        if !self.users.delete(user_id).await? {
            return Err(AppError::user_not_found());
        }

        info!(actor_id = %ctx.user_id(), user_id = %user_id, "Admin deleted user");
        Ok(())
    }

    async fn ensure_role_exists(&self, role_id: Uuid) -> Result<(), AppError> {
        match self.roles.find_by_id(role_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Role {role_id} not found"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use warden_auth::Principal;
    use warden_core::ErrorKind;
    use warden_core::config::AuthConfig;
    use warden_database::MemoryStore;

    use super::*;

    fn service(store: &MemoryStore) -> AdminUserService {
        let config = AuthConfig {
            kdf_memory_kib: 1024,
            kdf_iterations: 1,
            ..AuthConfig::default()
        };
        AdminUserService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            CredentialStore::new(&config).unwrap(),
            PasswordValidator::new(&config),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new(
            Principal {
                user_id: Uuid::new_v4(),
                email: "admin@x.com".to_string(),
                role_id: None,
                permissions: HashSet::new(),
            },
            "127.0.0.1".to_string(),
            None,
        )
    }

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            name: "U".to_string(),
            role_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::seeded();
        let svc = service(&store);

        let created = svc.create_user(&ctx(), request("u@x.com")).await.unwrap();
        let fetched = svc.get_user(&ctx(), created.id).await.unwrap();
        assert_eq!(fetched.email, "u@x.com");

        let err = svc.create_user(&ctx(), request("u@x.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmailTaken);
    }

    #[tokio::test]
    async fn test_create_with_unknown_role() {
        let store = MemoryStore::seeded();
        let svc = service(&store);
        let mut req = request("u@x.com");
        req.role_id = Some(Uuid::new_v4());

        let err = svc.create_user(&ctx(), req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let store = MemoryStore::seeded();
        let svc = service(&store);
        let created = svc.create_user(&ctx(), request("u@x.com")).await.unwrap();
        let before = UserRepository::find_by_id(&store, created.id).await.unwrap().unwrap();

        let update = UpdateUserRequest {
            password: Some("another1".to_string()),
            is_active: Some(false),
            ..UpdateUserRequest::default()
        };
        let updated = svc.update_user(&ctx(), created.id, update).await.unwrap();
        assert!(!updated.is_active);

        let after = UserRepository::find_by_id(&store, created.id).await.unwrap().unwrap();
        assert_ne!(before.password_hash, after.password_hash);
        assert!(!after.password_hash.contains("another1"));
    }

    #[tokio::test]
    async fn test_update_assigns_and_detaches_role() {
        let store = MemoryStore::seeded();
        let svc = service(&store);
        let created = svc.create_user(&ctx(), request("u@x.com")).await.unwrap();
        let admin_role = RoleRepository::find_by_name(&store, "admin")
            .await
            .unwrap()
            .unwrap();

        let assign = UpdateUserRequest {
            role_id: Some(Some(admin_role.id)),
            ..UpdateUserRequest::default()
        };
        let updated = svc.update_user(&ctx(), created.id, assign).await.unwrap();
        assert_eq!(updated.role_id, Some(admin_role.id));

        let unrelated = UpdateUserRequest {
            name: Some("V".to_string()),
            ..UpdateUserRequest::default()
        };
        let updated = svc.update_user(&ctx(), created.id, unrelated).await.unwrap();
        assert_eq!(updated.role_id, Some(admin_role.id));

        let detach = UpdateUserRequest {
            role_id: Some(None),
            ..UpdateUserRequest::default()
        };
        let updated = svc.update_user(&ctx(), created.id, detach).await.unwrap();
        assert_eq!(updated.role_id, None);

        let unknown = UpdateUserRequest {
            role_id: Some(Some(Uuid::new_v4())),
            ..UpdateUserRequest::default()
        };
        let err = svc.update_user(&ctx(), created.id, unknown).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_missing_user() {
        let store = MemoryStore::seeded();
        let svc = service(&store);
        let id = Uuid::new_v4();

        assert_eq!(
            svc.get_user(&ctx(), id).await.unwrap_err().kind,
            ErrorKind::UserNotFound
        );
        assert_eq!(
            svc.delete_user(&ctx(), id).await.unwrap_err().kind,
            ErrorKind::UserNotFound
        );
        assert_eq!(
            svc.update_user(&ctx(), id, UpdateUserRequest::default())
                .await
                .unwrap_err()
                .kind,
            ErrorKind::UserNotFound
        );
    }
}
