//! User repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::user::{CreateUser, UpdateUser, User, UserWithRole};

use super::role::load_role_detail;
use super::{db_error, is_foreign_key_violation, unique_violation};

/// Storage of user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user and resolve its role and that role's permissions.
    async fn find_with_role_permissions(&self, id: Uuid) -> AppResult<Option<UserWithRole>>;

    /// Same as [`find_with_role_permissions`](Self::find_with_role_permissions), keyed by email.
    async fn find_by_email_with_role_permissions(
        &self,
        email: &str,
    ) -> AppResult<Option<UserWithRole>>;

    /// List every user, newest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert a user. A duplicate email fails with `EmailTaken`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user and, by cascade, its refresh tokens.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_role(&self, user: Option<User>) -> AppResult<Option<UserWithRole>> {
        let Some(user) = user else {
            return Ok(None);
        };
        let role = match user.role_id {
            Some(role_id) => load_role_detail(&self.pool, role_id).await?,
            None => None,
        };
        Ok(Some(UserWithRole { user, role }))
    }
}

fn map_write_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if unique_violation(&e) == Some("users_email_key") {
            AppError::email_taken()
        } else if is_foreign_key_violation(&e) {
            AppError::not_found("Role not found")
        } else {
            db_error(context)(e)
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn find_with_role_permissions(&self, id: Uuid) -> AppResult<Option<UserWithRole>> {
        let user = self.find_by_id(id).await?;
        self.with_role(user).await
    }

    async fn find_by_email_with_role_permissions(
        &self,
        email: &str,
    ) -> AppResult<Option<UserWithRole>> {
        let user = self.find_by_email(email).await?;
        self.with_role(user).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users"))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name, role_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.name)
        .bind(data.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error("Failed to create user"))
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
                              password_hash = COALESCE($3, password_hash), \
                              is_active = COALESCE($4, is_active), \
                              role_id = CASE WHEN $6 THEN $5 ELSE role_id END, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.is_active)
        .bind(data.role_id.flatten())
        .bind(data.role_id.is_some())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error("Failed to update user"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
