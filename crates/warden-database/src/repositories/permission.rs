//! Permission repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::permission::{CreatePermission, Permission, UpdatePermission};

use super::{db_error, unique_violation};

/// Storage of the permission catalogue.
#[async_trait]
pub trait PermissionRepository: Send + Sync + 'static {
    /// Find a permission by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>>;

    /// Find a permission by exact name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>>;

    /// List every permission, by name.
    async fn find_all(&self) -> AppResult<Vec<Permission>>;

    /// Insert a permission. A duplicate name fails with `PermissionNameTaken`.
    async fn create(&self, data: &CreatePermission) -> AppResult<Permission>;

    /// Apply a partial update. Returns `None` if the permission does not exist.
    async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Option<Permission>>;

    /// Delete a permission and every role grant of it.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL permission repository.
#[derive(Debug, Clone)]
pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_name_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if unique_violation(&e) == Some("permissions_name_key") {
            AppError::permission_name_taken()
        } else {
            db_error(context)(e)
        }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find permission"))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find permission by name"))
    }

    async fn find_all(&self) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list permissions"))
    }

    async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (name, description, resource, action) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.resource)
        .bind(&data.action)
        .fetch_one(&self.pool)
        .await
        .map_err(map_name_error("Failed to create permission"))
    }

    async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "UPDATE permissions SET name = COALESCE($2, name), \
                                    description = COALESCE($3, description), \
                                    resource = COALESCE($4, resource), \
                                    action = COALESCE($5, action), \
                                    updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.resource)
        .bind(&data.action)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_name_error("Failed to update permission"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete permission"))?;
        Ok(result.rows_affected() > 0)
    }
}
