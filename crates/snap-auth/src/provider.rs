use async_trait::async_trait;
use snap_core::Identity;

use crate::credentials::Credentials;
use crate::error::AuthError;

/// Remote identity service behind the session store.
///
/// Implementations own any persisted tokens; the session store only sees
/// resolved identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a persisted session from a previous launch.
    ///
    /// `Ok(None)` means there is nothing to restore (or it was revoked).
    async fn restore(&self) -> Result<Option<Identity>, AuthError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Forget the persisted session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
