//! First-run administrator account.

use tracing::{info, warn};

use warden_auth::password::CredentialStore;
use warden_core::config::BootstrapConfig;
use warden_core::error::AppError;
use warden_database::Repositories;
use warden_entity::user::{CreateUser, User};

/// Creates the configured admin account if it does not exist yet.
///
/// Does nothing when no admin email is configured or the email is already
/// registered. The account is bound to the configured role, which must
/// already exist (the seed migrations create `admin`).
pub async fn ensure_admin(
    config: &BootstrapConfig,
    repos: &Repositories,
    credentials: &CredentialStore,
) -> Result<Option<User>, AppError> {
    let Some(email) = config.admin_email.as_deref() else {
        return Ok(None);
    };

    if repos.users.find_by_email(email).await?.is_some() {
        return Ok(None);
    }

    let Some(password) = config.admin_password.as_deref() else {
        warn!(email = %email, "bootstrap.admin_password is not set; skipping admin creation");
        return Ok(None);
    };

    let role = repos
        .roles
        .find_by_name(&config.admin_role)
        .await?
        .ok_or_else(|| {
            AppError::configuration(format!("Bootstrap role '{}' does not exist", config.admin_role))
        })?;

    let user = repos
        .users
        .create(&CreateUser {
            email: email.to_string(),
            password_hash: credentials.hash(password).await?,
            name: config.admin_name.clone(),
            role_id: Some(role.id),
        })
        .await?;

    info!(user_id = %user.id, role = %role.name, "Bootstrap admin created");
    Ok(Some(user))
}
