//! Permission catalogue handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use warden_auth::rbac::Operation;
use warden_core::error::AppError;
use warden_entity::permission::Permission;

use crate::dto::request::{CreatePermissionRequest, UpdatePermissionRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require;
use crate::state::AppState;

/// GET /api/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Permission>>>, AppError> {
    require(&state, &auth, Operation::ListPermissions)?;
    let permissions = state.permission_service.list_permissions(&auth).await?;
    Ok(Json(ApiResponse::ok(permissions)))
}

/// GET /api/permissions/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Permission>>, AppError> {
    require(&state, &auth, Operation::GetPermission)?;
    let permission = state
        .permission_service
        .get_permission(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(permission)))
}

/// POST /api/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Permission>>), AppError> {
    require(&state, &auth, Operation::CreatePermission)?;
    let permission = state
        .permission_service
        .create_permission(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(permission))))
}

/// PATCH /api/permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePermissionRequest>,
) -> Result<Json<ApiResponse<Permission>>, AppError> {
    require(&state, &auth, Operation::UpdatePermission)?;
    let permission = state
        .permission_service
        .update_permission(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(permission)))
}

/// DELETE /api/permissions/{id}
pub async fn delete_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require(&state, &auth, Operation::DeletePermission)?;
    state
        .permission_service
        .delete_permission(&auth, parse_uuid(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
