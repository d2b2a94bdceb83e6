use snap_core::{CoreError, ErrorKind};
use snap_gateway::{GatewayError, UploadError};
use thiserror::Error;

use crate::collaborators::MediaKind;
use crate::navigation::Route;

/// Errors returned by [`PostFeed`](crate::PostFeed) operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Rejected locally (validation, ownership, unknown post). No request was sent.
    #[error(transparent)]
    Local(#[from] CoreError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl FeedError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Local(e) => e.kind(),
            Self::Upload(e) => e.kind(),
            Self::Gateway(e) => e.kind(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Permission to access the {0} is required")]
    PermissionDenied(MediaKind),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl ComposeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Feed(e) => e.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("navigation is unavailable while the session is initializing")]
    NotReady,

    #[error("{0:?} is not part of the mounted screen graph")]
    NotMounted(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_pass_through() {
        let local = FeedError::from(CoreError::Authorization("nope".into()));
        assert_eq!(local.kind(), ErrorKind::Authorization);

        let gateway = FeedError::from(GatewayError::Protocol("bad".into()));
        assert_eq!(gateway.kind(), ErrorKind::Protocol);

        let denied = ComposeError::PermissionDenied(MediaKind::Camera);
        assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
        assert_eq!(denied.to_string(), "Permission to access the camera is required");
    }
}
