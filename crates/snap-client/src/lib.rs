//! # snap-client
//!
//! Client-side orchestration for TravelSnap, independent of any UI toolkit:
//! - [`PostFeed`]: the displayed post collection, with versioned optimistic
//!   mutations reconciled against the posts service
//! - [`NavigationGate`]: which screen graph is mounted, driven by the session
//! - [`Composer`]: draft assembly through permission and media collaborators
//! - [`ProfileView`] and confirmed sign-out
//!
//! Platform concerns (dialogs, pickers, permission prompts) come in through
//! the traits in [`collaborators`].

pub mod collaborators;
pub mod compose;
pub mod error;
pub mod feed;
pub mod navigation;
pub mod profile;

pub use collaborators::{Asset, Confirm, ConfirmPrompt, MediaKind, MediaSource, PermissionPrompt};
pub use compose::Composer;
pub use error::{ComposeError, FeedError, NavError};
pub use feed::{DeleteOutcome, FeedView, PostDetail, PostFeed};
pub use navigation::{Graph, NavState, NavigationGate, Navigator, Route};
pub use profile::{ProfileView, sign_out_confirmed};
