//! Role administration handlers, including permission assignment.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use warden_auth::rbac::Operation;
use warden_core::error::AppError;
use warden_entity::role::{Role, RoleDetail};

use crate::dto::request::{AssignPermissionRequest, CreateRoleRequest, UpdateRoleRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require;
use crate::state::AppState;

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Role>>>, AppError> {
    require(&state, &auth, Operation::ListRoles)?;
    let roles = state.role_service.list_roles(&auth).await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// GET /api/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RoleDetail>>, AppError> {
    require(&state, &auth, Operation::GetRole)?;
    let role = state.role_service.get_role(&auth, parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), AppError> {
    require(&state, &auth, Operation::CreateRole)?;
    let role = state.role_service.create_role(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role))))
}

/// PATCH /api/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<Role>>, AppError> {
    require(&state, &auth, Operation::UpdateRole)?;
    let role = state
        .role_service
        .update_role(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require(&state, &auth, Operation::DeleteRole)?;
    state.role_service.delete_role(&auth, parse_uuid(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/roles/{id}/permissions
pub async fn assign_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<AssignPermissionRequest>,
) -> Result<Json<ApiResponse<RoleDetail>>, AppError> {
    require(&state, &auth, Operation::AssignRolePermission)?;
    let role = state
        .role_service
        .assign_permission(&auth, parse_uuid(&id)?, req.permission_id)
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// DELETE /api/roles/{id}/permissions/{permission_id}
pub async fn remove_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, permission_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    require(&state, &auth, Operation::RemoveRolePermission)?;
    state
        .role_service
        .remove_permission(&auth, parse_uuid(&id)?, parse_uuid(&permission_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
