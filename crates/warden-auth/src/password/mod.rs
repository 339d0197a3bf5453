//! Credential hashing and password policy.

pub mod credential;
pub mod validator;

pub use credential::CredentialStore;
pub use validator::PasswordValidator;
