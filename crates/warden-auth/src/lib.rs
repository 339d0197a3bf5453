//! # warden-auth
//!
//! The credential and token lifecycle engine plus RBAC evaluation.
//!
//! ## Modules
//!
//! - `password`: salted Argon2id credential hashing and password policy
//! - `jwt`: signed access token claims, encoding, and decoding
//! - `token`: token pair issuance and the refresh token ledger
//! - `rbac`: permission evaluation and the per-operation policy table
//! - `authentication`: register, login, refresh, logout, and profile flows

pub mod authentication;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod token;

pub use authentication::{AuthenticationService, LoginResult};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{CredentialStore, PasswordValidator};
pub use rbac::{Operation, PermissionEvaluator, Principal};
pub use token::{RefreshTokenLedger, TokenIssuer};
