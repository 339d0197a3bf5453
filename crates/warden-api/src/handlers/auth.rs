//! Auth handlers: register, login, refresh, logout, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use warden_auth::LoginResult;
use warden_auth::rbac::Operation;
use warden_core::error::AppError;
use warden_entity::token::TokenPair;
use warden_entity::user::UserProfile;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    let profile = state
        .auth
        .register(&req.email, &req.password, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(profile))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, AppError> {
    let result = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let tokens = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// POST /api/auth/logout
///
/// Revokes every refresh token the caller holds. Outstanding access tokens
/// stay valid until they expire.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require(&state, &auth, Operation::Logout)?;
    state.auth.logout(auth.user_id()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    require(&state, &auth, Operation::GetProfile)?;
    let profile = state.auth.get_profile(auth.user_id()).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
