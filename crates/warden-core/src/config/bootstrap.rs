//! First-run administrator bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Optional admin account created on startup when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Email of the admin account.
    #[serde(default)]
    pub admin_email: Option<String>,
    /// Initial password of the admin account.
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Display name of the admin account.
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
    /// Role the admin account is bound to.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: None,
            admin_password: None,
            admin_name: default_admin_name(),
            admin_role: default_admin_role(),
        }
    }
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

fn default_admin_role() -> String {
    "admin".to_string()
}
