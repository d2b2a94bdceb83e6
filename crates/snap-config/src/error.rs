//! Errors raised while loading or checking TravelSnap settings.

use snap_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML layer or `SNAP_*` variable could not be merged into
    /// [`SnapConfig`](crate::SnapConfig).
    #[error("failed to read travelsnap settings: {0}")]
    Load(#[from] figment::Error),

    /// A section the caller needs has no usable values.
    #[error("travelsnap {section} settings are missing; set {env}")]
    NotConfigured {
        section: &'static str,
        env: &'static str,
    },

    /// A merged value rejected by [`SnapConfig::validate`](crate::SnapConfig::validate).
    #[error("invalid travelsnap setting {field} ({}): {reason}", env_key(.field))]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    /// Settings problems are all fixed by the user, never retried.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Load(_) | Self::NotConfigured { .. } | Self::InvalidValue { .. } => {
                ErrorKind::Validation
            }
        }
    }
}

/// Environment variable overriding a dotted field: `api.base_url` is
/// `SNAP_API__BASE_URL`.
fn env_key(field: &str) -> String {
    format!("SNAP_{}", field.to_ascii_uppercase().replace('.', "__"))
}
