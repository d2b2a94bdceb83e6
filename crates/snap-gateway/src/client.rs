use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snap_config::ApiConfig;
use snap_core::{Post, PostId};

use crate::error::GatewayError;
use crate::upload::UploadPayload;

/// Typed contract of the posts REST service.
///
/// | call | request |
/// |---|---|
/// | `health` | `GET /` |
/// | `list` | `GET /posts/` |
/// | `get` | `GET /posts/{id}` |
/// | `create` | `POST /posts/` multipart `title`, `user_uid`, `file` |
/// | `update` | `PUT /posts/{id}` multipart `title` |
/// | `delete` | `DELETE /posts/{id}` |
#[async_trait]
pub trait PostGateway: Send + Sync {
    /// All posts, in server order (newest first).
    async fn list(&self) -> Result<Vec<Post>, GatewayError>;

    async fn get(&self, id: PostId) -> Result<Post, GatewayError>;

    async fn create(&self, payload: UploadPayload) -> Result<Post, GatewayError>;

    /// Replace the title of a post. Nothing else is editable.
    async fn update(&self, id: PostId, title: &str) -> Result<Post, GatewayError>;

    async fn delete(&self, id: PostId) -> Result<(), GatewayError>;

    async fn health(&self) -> Result<HealthStatus, GatewayError>;
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// reqwest-backed [`PostGateway`].
pub struct HttpPostGateway {
    pub(crate) http: reqwest::Client,
    base_url: String,
}

impl HttpPostGateway {
    /// Build a gateway for `config.base_url` with the configured timeout and
    /// user agent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(http, config.base_url()))
    }

    /// Use a pre-built client (shared connection pool, custom TLS, ...).
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_without_double_slash() {
        let gateway = HttpPostGateway::with_client(reqwest::Client::new(), "http://api.test/");
        assert_eq!(gateway.base_url(), "http://api.test");
        assert_eq!(gateway.url("/posts/"), "http://api.test/posts/");
    }

    #[test]
    fn new_uses_config_base_url() {
        let config = ApiConfig {
            base_url: "https://snaps.example.com/".into(),
            ..ApiConfig::default()
        };
        let gateway = HttpPostGateway::new(&config).unwrap();
        assert_eq!(gateway.base_url(), "https://snaps.example.com");
    }
}
