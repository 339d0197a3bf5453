//! Orchestrates the credential and token lifecycle.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::traits::Clock;
use warden_database::repositories::{RefreshTokenRepository, UserRepository};
use warden_entity::token::TokenPair;
use warden_entity::user::{CreateUser, UserProfile};

use super::types::LoginResult;
use crate::password::{CredentialStore, PasswordValidator};
use crate::token::{RefreshTokenLedger, TokenIssuer};

/// Entry point for every authentication flow.
///
/// Holds no per-request state; all cross-request coordination happens
/// through conditional writes in storage.
#[derive(Clone)]
pub struct AuthenticationService {
    users: Arc<dyn UserRepository>,
    credentials: CredentialStore,
    password_validator: PasswordValidator,
    issuer: TokenIssuer,
    ledger: RefreshTokenLedger,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AuthenticationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AuthenticationService {
    /// Wires the service from its collaborators.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        credentials: CredentialStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ledger = RefreshTokenLedger::new(refresh_tokens);
        let issuer = TokenIssuer::new(config, ledger.clone(), Arc::clone(&clock));
        Self {
            users,
            credentials,
            password_validator: PasswordValidator::new(config),
            issuer,
            ledger,
            clock,
        }
    }

    /// Creates an account. Fails with `EmailTaken` if the email is in use,
    /// including when a concurrent registration wins the insert.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, AppError> {
        self.password_validator.validate(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::email_taken());
        }

        let password_hash = self.credentials.hash(password).await?;
        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
                role_id: None,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(UserProfile::from(user))
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown email and wrong password both fail with the same
    /// `InvalidCredentials`. The active flag is checked only after the
    /// password verifies.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let Some(resolved) = self.users.find_by_email_with_role_permissions(email).await? else {
            warn!("Login rejected: unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !self
            .credentials
            .verify(password, &resolved.user.password_hash)
            .await?
        {
            warn!(user_id = %resolved.user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials());
        }

        if !resolved.user.is_active {
            warn!(user_id = %resolved.user.id, "Login rejected: account inactive");
            return Err(AppError::account_inactive());
        }

        let tokens = self.issuer.issue_pair(&resolved.user).await?;
        info!(user_id = %resolved.user.id, "User logged in");

        Ok(LoginResult {
            user: resolved.into_profile(),
            tokens,
        })
    }

    /// Rotates a refresh token into a new pair bound to the same user.
    ///
    /// The presented token is revoked before the new pair is minted, so a
    /// failure after that point ends the session rather than duplicating it.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let consumed = self.ledger.consume(refresh_token, self.clock.now()).await?;

        let user = self
            .users
            .find_by_id(consumed.user_id)
            .await?
            .ok_or_else(AppError::invalid_token)?;

        let tokens = self.issuer.issue_pair(&user).await?;
        info!(user_id = %user.id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Revokes every live refresh token of `user_id`. Always succeeds
    /// unless storage fails.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AppError> {
        let revoked = self.ledger.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "User logged out");
        Ok(())
    }

    /// Returns the profile of `user_id` with role and permissions resolved.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile, AppError> {
        self.users
            .find_with_role_permissions(user_id)
            .await?
            .map(|resolved| resolved.into_profile())
            .ok_or_else(AppError::user_not_found)
    }

    /// The ledger backing refresh rotation.
    pub fn ledger(&self) -> &RefreshTokenLedger {
        &self.ledger
    }
}

