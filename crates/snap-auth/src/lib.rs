//! # snap-auth
//!
//! Authentication for TravelSnap.
//!
//! Provides the process-wide [`SessionStore`] (single writer of the auth
//! state, snapshot + subscription readers), the [`IdentityProvider`] seam with
//! a Firebase Identity Toolkit implementation, credential normalization, and
//! persisted-session storage (OS keychain with a file fallback).

pub mod credentials;
pub mod error;
pub mod firebase;
pub mod provider;
pub mod refresh;
pub mod session;
pub mod token_store;

pub use credentials::Credentials;
pub use error::AuthError;
pub use firebase::FirebaseIdentityProvider;
pub use provider::IdentityProvider;
pub use session::{SessionReader, SessionStore, Subscription};
pub use token_store::{StoredSession, TokenStore};
