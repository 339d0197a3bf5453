//! Role repository, including role-permission assignments.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::permission::Permission;
use warden_entity::role::{CreateRole, Role, RoleDetail, UpdateRole};

use super::{db_error, is_foreign_key_violation, unique_violation};

/// Storage of roles and their permission sets.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// Find a role by primary key, without permissions.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Find a role by exact name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Find a role and resolve its permissions.
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<RoleDetail>>;

    /// List every role, by name.
    async fn find_all(&self) -> AppResult<Vec<Role>>;

    /// Insert a role. A duplicate name fails with `RoleNameTaken`.
    async fn create(&self, data: &CreateRole) -> AppResult<Role>;

    /// Apply a partial update. Returns `None` if the role does not exist.
    async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Option<Role>>;

    /// Delete a role. Users holding it are left without a role.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Grant a permission to a role. An existing grant fails with `AssignmentConflict`.
    async fn add_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()>;

    /// Revoke a permission from a role. Returns `false` if it was not granted.
    async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL role repository.
#[derive(Debug, Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Loads a role and its permissions in two queries.
pub(crate) async fn load_role_detail(pool: &PgPool, role_id: Uuid) -> AppResult<Option<RoleDetail>> {
    let Some(role) = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
        .bind(role_id)
        .fetch_optional(pool)
        .await
        .map_err(db_error("Failed to find role"))?
    else {
        return Ok(None);
    };

    let permissions = sqlx::query_as::<_, Permission>(
        "SELECT p.* FROM permissions p \
         JOIN role_permissions rp ON rp.permission_id = p.id \
         WHERE rp.role_id = $1 \
         ORDER BY p.name ASC",
    )
    .bind(role_id)
    .fetch_all(pool)
    .await
    .map_err(db_error("Failed to load role permissions"))?;

    Ok(Some(RoleDetail { role, permissions }))
}

fn map_name_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if unique_violation(&e) == Some("roles_name_key") {
            AppError::role_name_taken()
        } else {
            db_error(context)(e)
        }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find role"))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find role by name"))
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<RoleDetail>> {
        load_role_detail(&self.pool, id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list roles"))
    }

    async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_name_error("Failed to create role"))
    }

    async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = COALESCE($2, name), \
                              description = COALESCE($3, description), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_name_error("Failed to update role"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete role"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)")
            .bind(role_id)
            .bind(permission_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if unique_violation(&e) == Some("role_permissions_pkey") {
                    AppError::assignment_conflict("Permission already assigned to this role")
                } else if is_foreign_key_violation(&e) {
                    AppError::not_found("Role or permission not found")
                } else {
                    db_error("Failed to assign permission")(e)
                }
            })?;
        Ok(())
    }

    async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = $2")
                .bind(role_id)
                .bind(permission_id)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to remove permission"))?;
        Ok(result.rows_affected() > 0)
    }
}
