//! Process-wide authentication state.
//!
//! [`SessionStore`] is the only writer of [`AuthState`]. Everything else holds
//! a [`SessionReader`]: a cheap clone that can take a synchronous snapshot or
//! subscribe to transitions.
//!
//! Delivery rules:
//! - a new subscriber is called once immediately when the store has resolved,
//!   otherwise its first call is the initialization result;
//! - every transition calls every subscriber exactly once, in transition
//!   order, with no coalescing;
//! - handlers run synchronously on the transitioning task and must not await.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use snap_core::{AuthState, Identity};

use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::provider::IdentityProvider;

type Handler = Arc<dyn Fn(Option<&Identity>) + Send + Sync>;

struct Shared {
    state: RwLock<AuthState>,
    subscribers: Mutex<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
    // Serializes "write state + deliver" so deliveries never reorder.
    // Reentrant so a handler may subscribe or drop subscriptions.
    dispatch: ReentrantMutex<()>,
}

impl Shared {
    fn snapshot(&self) -> AuthState {
        self.state.read().clone()
    }

    fn transition(&self, next: AuthState) -> bool {
        let _guard = self.dispatch.lock();
        {
            let mut state = self.state.write();
            if *state == next {
                return false;
            }
            *state = next.clone();
        }
        tracing::debug!(state = ?next, "auth state transition");

        let handlers: Vec<Handler> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        let identity = next.identity();
        for handler in handlers {
            handler(identity);
        }
        true
    }

    fn remove(&self, id: u64) {
        self.subscribers.lock().retain(|(sid, _)| *sid != id);
    }
}

/// Read side of the session: snapshot and subscription.
#[derive(Clone)]
pub struct SessionReader {
    shared: Arc<Shared>,
}

impl SessionReader {
    /// Synchronous snapshot of the signed-in identity.
    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.shared.state.read().identity().cloned()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.shared.snapshot()
    }

    /// Register `handler` for identity changes.
    ///
    /// The handler is invoked immediately with the current identity if the
    /// store has already resolved, and again on every later transition until
    /// the returned [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(Option<&Identity>) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let _guard = self.shared.dispatch.lock();

        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared
            .subscribers
            .lock()
            .push((id, Arc::clone(&handler)));

        let state = self.shared.snapshot();
        if state.is_resolved() {
            handler(state.identity());
        }

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl std::fmt::Debug for SessionReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionReader")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`SessionReader::subscribe`]. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove(self.id);
        }
    }
}

/// Single writer of the process-wide [`AuthState`].
pub struct SessionStore {
    shared: Arc<Shared>,
    provider: Arc<dyn IdentityProvider>,
}

impl SessionStore {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(AuthState::Initializing),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                dispatch: ReentrantMutex::new(()),
            }),
            provider,
        }
    }

    #[must_use]
    pub fn reader(&self) -> SessionReader {
        SessionReader {
            shared: Arc::clone(&self.shared),
        }
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.reader().current_identity()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.shared.snapshot()
    }

    /// Resolve the startup state from any persisted session.
    ///
    /// Always leaves the store resolved: a provider error or a restore that
    /// outlives `timeout` resolves to `Unauthenticated`. Calling this again
    /// after resolution is a no-op returning the current state.
    pub async fn initialize(&self, timeout: Duration) -> AuthState {
        if self.shared.snapshot().is_resolved() {
            return self.state();
        }

        let identity = match tokio::time::timeout(timeout, self.provider.restore()).await {
            Ok(Ok(identity)) => identity,
            Ok(Err(error)) => {
                tracing::warn!(%error, "identity provider failed to initialize; signed out");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = timeout.as_secs(),
                    "identity provider initialization timed out; signed out"
                );
                None
            }
        };

        // A sign-in that landed while restoring wins over the restored state.
        if !self.shared.snapshot().is_resolved() {
            self.shared.transition(AuthState::from_identity(identity));
        }
        self.state()
    }

    /// # Errors
    ///
    /// Returns the provider's `AuthError`; the state is left unchanged.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let identity = self.provider.sign_in(credentials).await?;
        self.shared
            .transition(AuthState::Authenticated(identity.clone()));
        Ok(identity)
    }

    /// # Errors
    ///
    /// Returns the provider's `AuthError`; the state is left unchanged.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let identity = self.provider.sign_up(credentials).await?;
        self.shared
            .transition(AuthState::Authenticated(identity.clone()));
        Ok(identity)
    }

    /// Sign out. The local state becomes `Unauthenticated` even when the
    /// provider fails to forget the persisted session.
    ///
    /// # Errors
    ///
    /// Returns the provider's `AuthError` after the local transition.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.provider.sign_out().await;
        self.shared.transition(AuthState::Unauthenticated);
        result
    }

    /// Force sign-out after the identity became invalid mid-session
    /// (revoked credential, rejected token).
    pub async fn invalidate(&self) {
        if let Err(error) = self.provider.sign_out().await {
            tracing::warn!(%error, "failed to clear persisted session during invalidation");
        }
        if self.shared.transition(AuthState::Unauthenticated) {
            tracing::info!("session invalidated");
        }
    }
}
