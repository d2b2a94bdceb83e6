use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use snap_auth::{
    AuthError, Credentials, FirebaseIdentityProvider, IdentityProvider, SessionStore, TokenStore,
};
use snap_client::PostFeed;
use snap_config::SnapConfig;
use snap_core::Identity;
use snap_gateway::{HttpPostGateway, PostGateway, UploadPipeline};

/// Everything a command needs: configuration, the resolved session, and the
/// feed over the posts service.
pub struct AppContext {
    pub config: SnapConfig,
    pub session: SessionStore,
    pub gateway: Arc<dyn PostGateway>,
    pub feed: PostFeed,
    pub token_store: Option<TokenStore>,
}

impl AppContext {
    pub async fn init(config: SnapConfig) -> anyhow::Result<Self> {
        let (provider, token_store): (Arc<dyn IdentityProvider>, Option<TokenStore>) =
            if config.identity.is_configured() {
                let store = TokenStore::default_location()?;
                let provider = FirebaseIdentityProvider::new(&config.identity, store.clone())
                    .context("failed to build identity provider")?;
                (Arc::new(provider), Some(store))
            } else {
                (Arc::new(UnconfiguredProvider), None)
            };

        let session = SessionStore::new(provider);
        let state = session
            .initialize(Duration::from_secs(config.identity.init_timeout_secs))
            .await;
        tracing::debug!(?state, "session resolved");

        let gateway: Arc<dyn PostGateway> = Arc::new(
            HttpPostGateway::new(&config.api).context("failed to build posts service client")?,
        );
        let pipeline = UploadPipeline::from_config(&config.upload);
        let feed = PostFeed::new(Arc::clone(&gateway), pipeline, session.reader());

        Ok(Self {
            config,
            session,
            gateway,
            feed,
            token_store,
        })
    }
}

/// Stand-in provider when no identity API key is configured: never signed in.
struct UnconfiguredProvider;

#[async_trait]
impl IdentityProvider for UnconfiguredProvider {
    async fn restore(&self) -> Result<Option<Identity>, AuthError> {
        Ok(None)
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Identity, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<Identity, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
