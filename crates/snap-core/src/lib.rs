//! # snap-core
//!
//! Core types shared by every TravelSnap crate:
//! - [`Identity`] snapshots and the process-wide [`AuthState`]
//! - [`Post`] as exchanged with the posts service
//! - [`Draft`] uploads built by the composer
//! - the ownership rule deciding who may edit or delete a post
//! - the cross-crate [`ErrorKind`] taxonomy

pub mod auth_state;
pub mod draft;
pub mod errors;
pub mod identity;
pub mod ownership;
pub mod post;

pub use auth_state::AuthState;
pub use draft::Draft;
pub use errors::{CoreError, ErrorKind};
pub use identity::Identity;
pub use ownership::{Affordances, can_mutate};
pub use post::{Post, PostId};
