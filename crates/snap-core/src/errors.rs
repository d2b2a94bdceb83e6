//! Cross-cutting error types for TravelSnap.
//!
//! Every crate keeps its own error enum (`AuthError`, `GatewayError`,
//! `FeedError`, ...). They all classify themselves with [`ErrorKind`] so a UI
//! layer can decide how to present a failure without matching on each enum.

use std::fmt;

use thiserror::Error;

use crate::post::PostId;

/// Failure classes surfaced to the presentation layer.
///
/// `Validation` and `Authorization` are always raised before any network
/// request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad local input.
    Validation,
    /// The acting identity may not perform the mutation.
    Authorization,
    /// An OS-level capability (camera, photo library) was declined.
    PermissionDenied,
    /// Transport failure, the request never got a response.
    Network,
    /// The service answered with a non-success status code.
    Server,
    /// The response body did not have the expected shape.
    Protocol,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::PermissionDenied => "permission_denied",
            Self::Network => "network",
            Self::Server => "server",
            Self::Protocol => "protocol",
        }
    }

    /// Whether this failure was detected locally, before any request.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(
            self,
            Self::Validation | Self::Authorization | Self::PermissionDenied
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the pure checks in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input failed a local constraint (empty title, missing image, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ownership rule rejected the mutation.
    #[error("Not allowed: {0}")]
    Authorization(String),

    /// The post is not part of the local collection.
    #[error("Post not found: {0}")]
    NotFound(PostId),
}

impl CoreError {
    /// An unknown post id is bad local input, so it classifies as validation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NotFound(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
        }
    }
}
