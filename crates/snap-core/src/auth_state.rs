use serde::Serialize;

use crate::identity::Identity;

/// Process-wide authentication state.
///
/// ```text
/// initializing → unauthenticated ⇄ authenticated(identity)
///              → authenticated(identity)
/// ```
///
/// Only the session store writes it. `Initializing` is left on the first
/// resolution and never re-entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "identity", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Initializing,
    Unauthenticated,
    Authenticated(Identity),
}

impl AuthState {
    /// Build the resolved state for an optional identity.
    #[must_use]
    pub fn from_identity(identity: Option<Identity>) -> Self {
        identity.map_or(Self::Unauthenticated, Self::Authenticated)
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Initializing | Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Initializing)
    }
}
