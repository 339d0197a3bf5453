//! Operation-level permission guard.

use warden_auth::rbac::Operation;
use warden_core::error::AppError;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Checks that the authenticated user holds every permission `operation` declares.
pub fn require(state: &AppState, auth: &AuthUser, operation: Operation) -> Result<(), AppError> {
    state.evaluator.guard(operation, Some(&auth.principal)).inspect_err(|_| {
        tracing::warn!(
            user_id = %auth.user_id(),
            operation = %operation,
            required = ?operation.required_permissions(),
            "Permission denied"
        );
    })
}
