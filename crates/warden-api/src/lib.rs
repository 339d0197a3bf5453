//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! Exposes the authentication endpoints and the user, role, and permission
//! administration endpoints. Every protected handler resolves the caller
//! through the [`extractors::AuthUser`] extractor and checks the operation's
//! declared permissions before calling into the service layer.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server, shutdown_signal};
pub use state::AppState;
