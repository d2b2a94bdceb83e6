use std::sync::Arc;

use snap_core::{Draft, Post};

use crate::collaborators::{MediaKind, MediaSource, PermissionPrompt};
use crate::error::ComposeError;
use crate::feed::PostFeed;

/// Add-post form state.
///
/// Picking an image asks for the matching permission first. A cancelled
/// picker leaves the draft as it was.
pub struct Composer {
    draft: Draft,
    permissions: Arc<dyn PermissionPrompt>,
    media: Arc<dyn MediaSource>,
}

impl Composer {
    #[must_use]
    pub fn new(permissions: Arc<dyn PermissionPrompt>, media: Arc<dyn MediaSource>) -> Self {
        Self {
            draft: Draft::default(),
            permissions,
            media,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Ask for access to `kind`, then let the user pick.
    ///
    /// Returns `false` when the picker was cancelled.
    ///
    /// # Errors
    ///
    /// [`ComposeError::PermissionDenied`] when access is refused; the media
    /// source is not opened.
    pub async fn choose_image(&mut self, kind: MediaKind) -> Result<bool, ComposeError> {
        if !self.permissions.request(kind).await {
            tracing::info!(%kind, "media permission denied");
            return Err(ComposeError::PermissionDenied(kind));
        }
        let Some(asset) = self.media.pick(kind).await else {
            return Ok(false);
        };
        self.draft.local_asset_uri = Some(asset.uri);
        self.draft.mime_hint = asset.mime;
        Ok(true)
    }

    pub fn clear_image(&mut self) {
        self.draft.local_asset_uri = None;
        self.draft.mime_hint = None;
    }

    /// Hand the draft over and reset the form.
    pub fn take_draft(&mut self) -> Draft {
        std::mem::take(&mut self.draft)
    }

    /// Create the post from the current draft.
    ///
    /// An invalid draft stays in the form so the user can fix it; a valid one
    /// is consumed whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the feed's error, wrapped.
    pub async fn submit(&mut self, feed: &PostFeed) -> Result<Post, ComposeError> {
        self.draft.validate().map_err(crate::error::FeedError::from)?;
        let draft = self.take_draft();
        Ok(feed.create(draft).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::collaborators::Asset;

    struct Permissions(bool);

    #[async_trait]
    impl PermissionPrompt for Permissions {
        async fn request(&self, _kind: MediaKind) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct Picker {
        cancel: bool,
        opened: AtomicUsize,
    }

    #[async_trait]
    impl MediaSource for Picker {
        async fn pick(&self, kind: MediaKind) -> Option<Asset> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            (!self.cancel).then(|| Asset {
                uri: match kind {
                    MediaKind::Camera => "file:///tmp/camera.jpg".into(),
                    MediaKind::Library => "file:///tmp/library.png".into(),
                },
                mime: None,
            })
        }
    }

    #[tokio::test]
    async fn picks_after_permission() {
        let mut composer = Composer::new(Arc::new(Permissions(true)), Arc::new(Picker::default()));
        composer.set_title("Sunset");

        assert!(composer.choose_image(MediaKind::Library).await.unwrap());
        assert_eq!(
            composer.draft().local_asset_uri.as_deref(),
            Some("file:///tmp/library.png")
        );
        assert!(composer.draft().validate().is_ok());
    }

    #[tokio::test]
    async fn denied_permission_never_opens_picker() {
        let picker = Arc::new(Picker::default());
        let mut composer = Composer::new(Arc::new(Permissions(false)), picker.clone());

        let err = composer.choose_image(MediaKind::Camera).await.unwrap_err();
        assert!(matches!(err, ComposeError::PermissionDenied(MediaKind::Camera)));
        assert_eq!(picker.opened.load(Ordering::SeqCst), 0);
        assert!(composer.draft().local_asset_uri.is_none());
    }

    #[tokio::test]
    async fn cancelled_pick_keeps_previous_image() {
        let mut composer = Composer::new(Arc::new(Permissions(true)), Arc::new(Picker::default()));
        composer.choose_image(MediaKind::Camera).await.unwrap();

        composer.media = Arc::new(Picker {
            cancel: true,
            ..Picker::default()
        });
        assert!(!composer.choose_image(MediaKind::Library).await.unwrap());
        assert_eq!(
            composer.draft().local_asset_uri.as_deref(),
            Some("file:///tmp/camera.jpg")
        );
    }

    #[test]
    fn take_draft_resets_form() {
        let mut composer = Composer::new(Arc::new(Permissions(true)), Arc::new(Picker::default()));
        composer.set_title("Beach");
        let draft = composer.take_draft();
        assert_eq!(draft.title, "Beach");
        assert_eq!(composer.draft(), &Draft::default());
    }
}
