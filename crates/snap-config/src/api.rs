//! Posts service connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("travelsnap/", env!("CARGO_PKG_VERSION")).into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the posts service, without the `/posts` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout applied by the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-http(s) base URL or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("travelsnap/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "http://192.168.1.2:8000/".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://192.168.1.2:8000");
    }

    #[test]
    fn rejects_non_http_url() {
        let config = ApiConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.base_url"
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
