//! Unified application error types for Warden.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The [`ErrorKind`] taxonomy separates
//! the expected, caller-recoverable outcomes of the auth core from opaque
//! infrastructure failures.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Registration with an already-registered email.
    EmailTaken,
    /// Unknown email or wrong password at login.
    InvalidCredentials,
    /// Valid credentials for a disabled account.
    AccountInactive,
    /// The presented refresh token does not exist.
    InvalidToken,
    /// The presented refresh token was already revoked.
    TokenRevoked,
    /// The presented refresh token is past its expiry.
    TokenExpired,
    /// Profile or user lookup on a nonexistent id.
    UserNotFound,
    /// RBAC check failure.
    PermissionDenied,
    /// Role name already in use.
    RoleNameTaken,
    /// Permission name already in use.
    PermissionNameTaken,
    /// Permission already assigned to the role.
    AssignmentConflict,
    /// A role or permission was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// The request carries no valid access token.
    Unauthenticated,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind is an infrastructure failure rather than an expected outcome.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database | Self::Configuration | Self::Serialization | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailTaken => write!(f, "EMAIL_TAKEN"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::AccountInactive => write!(f, "ACCOUNT_INACTIVE"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::TokenRevoked => write!(f, "TOKEN_REVOKED"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::RoleNameTaken => write!(f, "ROLE_NAME_TAKEN"),
            Self::PermissionNameTaken => write!(f, "PERMISSION_NAME_TAKEN"),
            Self::AssignmentConflict => write!(f, "ASSIGNMENT_CONFLICT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Warden.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Registration with an email that already exists.
    pub fn email_taken() -> Self {
        Self::new(ErrorKind::EmailTaken, "Email already registered")
    }

    /// Unknown email or wrong password. Both cases share this message.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid credentials")
    }

    /// The account exists but is disabled.
    pub fn account_inactive() -> Self {
        Self::new(ErrorKind::AccountInactive, "User account is inactive")
    }

    /// Refresh token not found.
    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken, "Invalid refresh token")
    }

    /// Refresh token already revoked.
    pub fn token_revoked() -> Self {
        Self::new(ErrorKind::TokenRevoked, "Refresh token has been revoked")
    }

    /// Refresh token expired.
    pub fn token_expired() -> Self {
        Self::new(ErrorKind::TokenExpired, "Refresh token has expired")
    }

    /// User lookup failed.
    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, "User not found")
    }

    /// RBAC check failed.
    pub fn permission_denied() -> Self {
        Self::new(ErrorKind::PermissionDenied, "Insufficient permissions")
    }

    /// Role name conflict.
    pub fn role_name_taken() -> Self {
        Self::new(ErrorKind::RoleNameTaken, "Role name already exists")
    }

    /// Permission name conflict.
    pub fn permission_name_taken() -> Self {
        Self::new(ErrorKind::PermissionNameTaken, "Permission name already exists")
    }

    /// Role-permission assignment conflict.
    pub fn assignment_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssignmentConflict, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is an infrastructure failure.
    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
