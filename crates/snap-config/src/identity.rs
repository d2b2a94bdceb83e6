//! Identity provider (Firebase Identity Toolkit) configuration.

use serde::{Deserialize, Serialize};

fn default_auth_endpoint() -> String {
    "https://identitytoolkit.googleapis.com".into()
}

fn default_token_endpoint() -> String {
    "https://securetoken.googleapis.com".into()
}

const fn default_init_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Web API key of the Firebase project.
    #[serde(default)]
    pub api_key: String,

    /// Identity Toolkit base URL (sign-in / sign-up).
    #[serde(default = "default_auth_endpoint")]
    pub auth_endpoint: String,

    /// Secure token service base URL (id token refresh).
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// Upper bound on restoring a persisted session at startup.
    #[serde(default = "default_init_timeout_secs")]
    pub init_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_endpoint: default_auth_endpoint(),
            token_endpoint: default_token_endpoint(),
            init_timeout_secs: default_init_timeout_secs(),
        }
    }
}

impl IdentityConfig {
    /// Check if the identity provider has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
