//! User administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use warden_auth::rbac::Operation;
use warden_core::error::AppError;
use warden_entity::user::UserProfile;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, AppError> {
    require(&state, &auth, Operation::ListUsers)?;
    let users = state.admin_user_service.list_users(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    require(&state, &auth, Operation::GetUser)?;
    let user = state
        .admin_user_service
        .get_user(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    require(&state, &auth, Operation::CreateUser)?;
    let user = state
        .admin_user_service
        .create_user(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    require(&state, &auth, Operation::UpdateUser)?;
    let user = state
        .admin_user_service
        .update_user(&auth, parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require(&state, &auth, Operation::DeleteUser)?;
    state
        .admin_user_service
        .delete_user(&auth, parse_uuid(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
