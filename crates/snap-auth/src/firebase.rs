//! Firebase Identity Toolkit provider.
//!
//! Email/password sign-in and sign-up go through the Identity Toolkit REST
//! API (`accounts:signInWithPassword`, `accounts:signUp`); persisted sessions
//! are refreshed through the Secure Token API before use.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use snap_config::IdentityConfig;
use snap_core::Identity;

use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::refresh::needs_refresh;
use crate::token_store::{StoredSession, TokenStore};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct FirebaseIdentityProvider {
    http: reqwest::Client,
    api_key: String,
    auth_endpoint: String,
    token_endpoint: String,
    store: TokenStore,
}

impl FirebaseIdentityProvider {
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] when no API key is set, or
    /// [`AuthError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &IdentityConfig, store: TokenStore) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("travelsnap/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.trim().to_string(),
            auth_endpoint: config.auth_endpoint.trim_end_matches('/').to_string(),
            token_endpoint: config.token_endpoint.trim_end_matches('/').to_string(),
            store,
        })
    }

    async fn current_session(&self) -> Result<Option<StoredSession>, AuthError> {
        let Some(session) = self.store.load() else {
            return Ok(None);
        };
        if !needs_refresh(&session.id_token, chrono::Utc::now()) {
            return Ok(Some(session));
        }

        tracing::debug!(uid = %session.uid, "refreshing persisted session");
        match self.refresh(&session).await {
            Ok(refreshed) => {
                self.store.store(&refreshed)?;
                Ok(Some(refreshed))
            }
            Err(error) if is_rejection(&error) => {
                tracing::warn!(%error, "persisted session rejected; clearing it");
                self.store.delete()?;
                Ok(None)
            }
            // Outages and transport failures keep the session for the next launch.
            Err(error) => Err(error),
        }
    }

    async fn refresh(&self, session: &StoredSession) -> Result<StoredSession, AuthError> {
        let url = format!(
            "{}/v1/token?key={}",
            self.token_endpoint,
            urlencoding::encode(&self.api_key)
        );
        let body = serde_json::json!({
            "grant_type": "refresh_token",
            "refresh_token": session.refresh_token,
        });
        let resp: TokenResponse = self.post_json(&url, &body).await?;
        if resp.user_id != session.uid {
            return Err(AuthError::Protocol(format!(
                "refreshed token belongs to {}, expected {}",
                resp.user_id, session.uid
            )));
        }
        Ok(StoredSession {
            uid: resp.user_id,
            email: session.email.clone(),
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        })
    }

    async fn account_call(
        &self,
        method: &str,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError> {
        let url = format!(
            "{}/v1/accounts:{method}?key={}",
            self.auth_endpoint,
            urlencoding::encode(&self.api_key)
        );
        let body = serde_json::json!({
            "email": credentials.email(),
            "password": credentials.password(),
            "returnSecureToken": true,
        });
        let resp: AccountResponse = self.post_json(&url, &body).await?;

        let session = StoredSession {
            uid: resp.local_id,
            email: resp.email.or_else(|| Some(credentials.email().to_string())),
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        };
        self.store.store(&session)?;
        tracing::info!(uid = %session.uid, method, "signed in");
        Ok(Identity::new(session.uid, session.email))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, AuthError> {
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(provider_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text)
            .map_err(|e| AuthError::Protocol(format!("decode identity response: {e}")))
    }
}

/// The provider refused the refresh token itself, as opposed to failing to answer.
const fn is_rejection(error: &AuthError) -> bool {
    match error {
        AuthError::SessionExpired => true,
        AuthError::Provider { status, .. } => *status >= 400 && *status < 500,
        _ => false,
    }
}

fn provider_error(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => AuthError::from_provider_code(status, &envelope.error.message),
        Err(_) => AuthError::Provider {
            status,
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn restore(&self) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .current_session()
            .await?
            .map(|session| Identity::new(session.uid, session.email)))
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        self.account_call("signInWithPassword", credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        self.account_call("signUp", credentials).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.delete()
    }
}
