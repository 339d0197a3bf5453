//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, MAX_ACCESS_TOKEN_TTL_MINUTES, MAX_REFRESH_TOKEN_TTL_DAYS};
pub use self::bootstrap::BootstrapConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// First-run admin account.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `WARDEN__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WARDEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the auth core cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.access_token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.access_token_ttl_minutes must be greater than zero",
            ));
        }
        if self.auth.access_token_ttl_minutes > MAX_ACCESS_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be at most {MAX_ACCESS_TOKEN_TTL_MINUTES}"
            )));
        }
        if self.auth.refresh_token_ttl_days == 0 {
            return Err(AppError::configuration(
                "auth.refresh_token_ttl_days must be greater than zero",
            ));
        }
        if self.auth.refresh_token_ttl_days > MAX_REFRESH_TOKEN_TTL_DAYS {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_days must be at most {MAX_REFRESH_TOKEN_TTL_DAYS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/warden".to_string(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = sample();
        config.auth.jwt_secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_refresh_days_rejected() {
        let mut config = sample();
        config.auth.refresh_token_ttl_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_upper_bounds() {
        let mut config = sample();
        config.auth.refresh_token_ttl_days = MAX_REFRESH_TOKEN_TTL_DAYS;
        config.auth.access_token_ttl_minutes = MAX_ACCESS_TOKEN_TTL_MINUTES;
        assert!(config.validate().is_ok());

        config.auth.refresh_token_ttl_days = 200_000_000;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);

        let mut config = sample();
        config.auth.access_token_ttl_minutes = MAX_ACCESS_TOKEN_TTL_MINUTES + 1;
        assert!(config.validate().is_err());
    }
}
