//! Gateway and upload error types.

use snap_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors returned by [`PostGateway`](crate::PostGateway) calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection failure; no response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body, or the raw body.
        message: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl GatewayError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Protocol(_) => ErrorKind::Protocol,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Server { status: 404, .. })
    }
}

/// Errors raised while turning a draft into an [`UploadPayload`](crate::UploadPayload).
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("failed to read image {uri}: {source}")]
    Io {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("fetching image {uri} returned status {status}")]
    FetchStatus { uri: String, status: u16 },

    #[error("image is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

impl UploadError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(e) => e.kind(),
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
                ErrorKind::PermissionDenied
            }
            Self::Io { .. } | Self::TooLarge { .. } => ErrorKind::Validation,
            Self::Fetch(_) => ErrorKind::Network,
            Self::FetchStatus { .. } => ErrorKind::Server,
        }
    }
}
