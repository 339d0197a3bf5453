//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use warden_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmailTaken | ErrorKind::RoleNameTaken | ErrorKind::PermissionNameTaken => {
            StatusCode::CONFLICT
        }
        ErrorKind::AssignmentConflict | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidCredentials
        | ErrorKind::AccountInactive
        | ErrorKind::InvalidToken
        | ErrorKind::TokenRevoked
        | ErrorKind::TokenExpired
        | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
        ErrorKind::UserNotFound | ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);

        let body = if self.is_internal() {
            tracing::error!(
                kind = %self.kind,
                error = %self.message,
                source = ?self.source,
                "Internal server error"
            );
            ApiErrorResponse {
                error: "INTERNAL_ERROR".to_string(),
                message: "An internal error occurred".to_string(),
            }
        } else {
            ApiErrorResponse {
                error: self.kind.to_string(),
                message: self.message,
            }
        };

        (status, Json(body)).into_response()
    }
}
