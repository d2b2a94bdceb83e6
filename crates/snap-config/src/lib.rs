//! # snap-config
//!
//! Layered configuration loading for TravelSnap using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SNAP_*` prefix, `__` as separator)
//! 2. Project-level `.travelsnap/config.toml`
//! 3. User-level `~/.config/travelsnap/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SNAP_API__BASE_URL` -> `api.base_url`,
//! `SNAP_IDENTITY__API_KEY` -> `identity.api_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use snap_config::SnapConfig;
//!
//! let config = SnapConfig::load_with_dotenv().expect("config");
//! println!("posts service: {}", config.api.base_url());
//! ```

mod api;
mod error;
mod identity;
mod upload;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use identity::IdentityConfig;
pub use upload::{UploadConfig, UploadMode};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

impl SnapConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or the merged
    /// values fail [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".travelsnap/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SNAP_").split("__"))
    }

    /// Cross-section checks on merged values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.upload.max_upload_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.max_upload_mb",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Identity section, or an error naming it when the API key is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `identity.api_key` is empty.
    pub fn require_identity(&self) -> Result<&IdentityConfig, ConfigError> {
        if self.identity.is_configured() {
            Ok(&self.identity)
        } else {
            Err(ConfigError::NotConfigured {
                section: "identity",
                env: "SNAP_IDENTITY__API_KEY",
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("travelsnap").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
