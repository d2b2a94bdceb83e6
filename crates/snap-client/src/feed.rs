//! The displayed post collection.
//!
//! Local state is a versioned snapshot behind a `parking_lot::Mutex` that is
//! never held across an `.await`. Every refresh that lands replaces the
//! collection wholesale and bumps the version. An optimistic patch records
//! the version it was applied to; its reconciliation (server copy or
//! rollback) is only applied while that version is still current, so a newer
//! refresh always supersedes it.
//!
//! The rendered state is published on a `watch` channel. Publishing never
//! fails, so responses arriving after the view went away are dropped quietly.

use std::sync::Arc;

use parking_lot::Mutex;
use snap_auth::SessionReader;
use snap_core::ownership::ensure_can_mutate;
use snap_core::{Affordances, CoreError, Draft, Identity, Post, PostId, draft::validate_title};
use snap_gateway::{PostGateway, UploadPipeline};
use tokio::sync::watch;

use crate::collaborators::{Confirm, ConfirmPrompt};
use crate::error::FeedError;

/// What the feed screen should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// No fetch has completed yet.
    Loading,
    /// Loaded, nothing posted yet. Not an error.
    Empty,
    Ready(Vec<Post>),
}

/// Result of [`PostFeed::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The post is gone. When `leave_detail` is set the caller navigates away
    /// from the post's detail view.
    Deleted { leave_detail: bool },
}

/// Detail screen data for one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub owner_label: String,
    pub affordances: Affordances,
}

#[derive(Debug, Default)]
struct Snapshot {
    version: u64,
    loaded: bool,
    posts: Vec<Post>,
}

impl Snapshot {
    fn view(&self) -> FeedView {
        match (self.loaded, self.posts.is_empty()) {
            (false, _) => FeedView::Loading,
            (true, true) => FeedView::Empty,
            (true, false) => FeedView::Ready(self.posts.clone()),
        }
    }

    fn find(&self, id: PostId) -> Result<&Post, CoreError> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound(id))
    }
}

pub struct PostFeed {
    gateway: Arc<dyn PostGateway>,
    pipeline: UploadPipeline,
    session: SessionReader,
    state: Mutex<Snapshot>,
    view: watch::Sender<FeedView>,
}

impl PostFeed {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn PostGateway>,
        pipeline: UploadPipeline,
        session: SessionReader,
    ) -> Self {
        let (view, _) = watch::channel(FeedView::Loading);
        Self {
            gateway,
            pipeline,
            session,
            state: Mutex::new(Snapshot::default()),
            view,
        }
    }

    /// Receiver of every published [`FeedView`].
    #[must_use]
    pub fn subscribe_view(&self) -> watch::Receiver<FeedView> {
        self.view.subscribe()
    }

    #[must_use]
    pub fn view(&self) -> FeedView {
        self.state.lock().view()
    }

    /// Current collection in server order.
    #[must_use]
    pub fn posts(&self) -> Vec<Post> {
        self.state.lock().posts.clone()
    }

    #[must_use]
    pub fn post(&self, id: PostId) -> Option<Post> {
        self.state.lock().find(id).ok().cloned()
    }

    /// Which mutations the signed-in identity may offer for `id`.
    #[must_use]
    pub fn affordances(&self, id: PostId) -> Affordances {
        let identity = self.session.current_identity();
        self.state
            .lock()
            .find(id)
            .map(|post| Affordances::for_post(identity.as_ref(), post))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn detail(&self, id: PostId) -> Option<PostDetail> {
        let post = self.post(id)?;
        let identity = self.session.current_identity();
        Some(PostDetail {
            owner_label: post.short_owner(),
            affordances: Affordances::for_post(identity.as_ref(), &post),
            post,
        })
    }

    /// Fetch the full list and replace local state (full replace or nothing).
    ///
    /// When refreshes overlap, the last response to arrive wins.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; local state is left untouched.
    pub async fn refresh(&self) -> Result<(), FeedError> {
        let posts = self.gateway.list().await?;
        let mut state = self.state.lock();
        state.version += 1;
        state.loaded = true;
        state.posts = posts;
        tracing::debug!(version = state.version, count = state.posts.len(), "feed refreshed");
        self.publish(&state);
        Ok(())
    }

    /// Screen focus hook. Same as [`refresh`](Self::refresh).
    ///
    /// # Errors
    ///
    /// Returns the gateway error; local state is left untouched.
    pub async fn on_focus(&self) -> Result<(), FeedError> {
        self.refresh().await
    }

    /// Upload a new post for the signed-in identity, then refresh so it shows.
    ///
    /// The draft is consumed whatever the outcome. Invalid drafts fail before
    /// any request.
    ///
    /// # Errors
    ///
    /// [`FeedError::Local`] for an invalid draft or no signed-in identity,
    /// [`FeedError::Upload`] if the asset cannot be read, or the gateway error.
    pub async fn create(&self, draft: Draft) -> Result<Post, FeedError> {
        draft.validate()?;
        let identity = self
            .session
            .current_identity()
            .ok_or_else(|| CoreError::Authorization("sign in to create a post".into()))?;

        let payload = self.pipeline.prepare(draft, &identity.uid).await?;
        let post = self.gateway.create(payload).await?;

        if let Err(error) = self.refresh().await {
            tracing::warn!(%error, post_id = %post.id, "post created but refresh failed; inserting locally");
            let mut state = self.state.lock();
            if state.loaded && state.find(post.id).is_err() {
                state.posts.insert(0, post.clone());
                self.publish(&state);
            }
        }
        Ok(post)
    }

    /// Rename a post owned by the signed-in identity.
    ///
    /// The new title shows immediately and is rolled back if the request
    /// fails.
    ///
    /// # Errors
    ///
    /// [`FeedError::Local`] for a blank title, an unknown post, or a caller
    /// who is not the owner (no request sent); otherwise the gateway error.
    pub async fn update(&self, id: PostId, new_title: &str) -> Result<Post, FeedError> {
        validate_title(new_title)?;
        let title = new_title.trim().to_string();
        let identity = self.session.current_identity();

        let (version, previous) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let post = state
                .posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(CoreError::NotFound(id))?;
            ensure_can_mutate(identity.as_ref(), post)?;
            let previous = std::mem::replace(&mut post.title, title.clone());
            self.publish(state);
            (state.version, previous)
        };

        match self.gateway.update(id, &title).await {
            Ok(server) => {
                self.reconcile(version, id, |post| {
                    *post = server.clone();
                    true
                });
                Ok(server)
            }
            Err(error) => {
                tracing::warn!(%error, post_id = %id, "update failed; rolling back title");
                self.reconcile(version, id, |post| {
                    // Leave a later optimistic title alone.
                    if post.title != title {
                        return false;
                    }
                    post.title = previous;
                    true
                });
                Err(error.into())
            }
        }
    }

    /// Delete a post owned by the signed-in identity after the user confirms.
    ///
    /// The post leaves the collection only once the service confirms.
    ///
    /// # Errors
    ///
    /// [`FeedError::Local`] for an unknown post or a caller who is not the
    /// owner, checked both before the prompt and after it resolves (no
    /// request either way); otherwise the gateway error, in which
    /// case the post stays.
    pub async fn delete(&self, id: PostId, confirm: &dyn Confirm) -> Result<DeleteOutcome, FeedError> {
        self.check_owner(id)?;

        if !confirm.confirm(&ConfirmPrompt::delete_post()).await {
            return Ok(DeleteOutcome::Cancelled);
        }
        // The session may have changed while the prompt was open.
        self.check_owner(id)?;

        self.gateway.delete(id).await?;

        // The post is gone server-side, so drop it from whatever snapshot is
        // current, including one that replaced ours meanwhile.
        let mut state = self.state.lock();
        state.posts.retain(|p| p.id != id);
        self.publish(&state);
        Ok(DeleteOutcome::Deleted { leave_detail: true })
    }

    fn check_owner(&self, id: PostId) -> Result<(), CoreError> {
        let identity: Option<Identity> = self.session.current_identity();
        let state = self.state.lock();
        ensure_can_mutate(identity.as_ref(), state.find(id)?)
    }

    /// Apply `patch` to post `id` if `version` is still the current snapshot.
    fn reconcile(&self, version: u64, id: PostId, patch: impl FnOnce(&mut Post) -> bool) {
        let mut state = self.state.lock();
        if state.version != version {
            tracing::debug!(
                post_id = %id,
                patch_version = version,
                current_version = state.version,
                "discarding patch superseded by a newer refresh"
            );
            return;
        }
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == id)
            && patch(post)
        {
            self.publish(&state);
        }
    }

    fn publish(&self, state: &Snapshot) {
        self.view.send_replace(state.view());
    }
}
