//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Reports `degraded` with 503 when the database does not answer.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let (status, database) = match &state.database {
        None => (StatusCode::OK, "memory"),
        Some(pool) => match pool.health_check().await {
            Ok(true) => (StatusCode::OK, "connected"),
            Ok(false) | Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        },
    };

    let body = HealthResponse {
        status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };

    (status, Json(ApiResponse::ok(body)))
}
