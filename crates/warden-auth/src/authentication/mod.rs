//! Registration, login, refresh, logout, and profile flows.

pub mod service;
pub mod types;

pub use service::AuthenticationService;
pub use types::LoginResult;
