//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: u64 = 1_440;

/// Longest accepted refresh token lifetime (ten years).
pub const MAX_REFRESH_TOKEN_TTL_DAYS: u64 = 3_650;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_kdf_memory")]
    pub kdf_memory_kib: u32,
    /// Argon2 pass count.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            kdf_memory_kib: default_kdf_memory(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    6
}

fn default_kdf_memory() -> u32 {
    19_456
}

fn default_kdf_iterations() -> u32 {
    2
}

fn default_kdf_parallelism() -> u32 {
    1
}
