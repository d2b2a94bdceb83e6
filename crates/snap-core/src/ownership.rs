//! Ownership rule for post mutations.
//!
//! Checked twice: once to decide which affordances a screen shows, and again
//! right before a mutation request so a stale screen cannot issue one.

use serde::Serialize;

use crate::errors::CoreError;
use crate::identity::Identity;
use crate::post::Post;

/// True iff there is an acting identity and it created `post`.
#[must_use]
pub fn can_mutate(identity: Option<&Identity>, post: &Post) -> bool {
    identity.is_some_and(|identity| identity.uid == post.owner_uid)
}

/// Gate form of [`can_mutate`].
///
/// # Errors
///
/// Returns [`CoreError::Authorization`] when the identity is absent or is not
/// the owner of `post`.
pub fn ensure_can_mutate(identity: Option<&Identity>, post: &Post) -> Result<(), CoreError> {
    if can_mutate(identity, post) {
        return Ok(());
    }
    let reason = match identity {
        None => format!("sign in to modify post {}", post.id),
        Some(_) => format!("only the owner can modify post {}", post.id),
    };
    Err(CoreError::Authorization(reason))
}

/// Mutation affordances a post screen exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Affordances {
    #[must_use]
    pub fn for_post(identity: Option<&Identity>, post: &Post) -> Self {
        let owner = can_mutate(identity, post);
        Self {
            can_edit: owner,
            can_delete: owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostId;

    fn post(owner: &str) -> Post {
        Post {
            id: PostId(1),
            title: "Beach".into(),
            image_url: "https://img.example/1.jpg".into(),
            owner_uid: owner.into(),
            created_at: None,
        }
    }

    #[test]
    fn truth_table() {
        let beach = post("u1");
        let owner = Identity::new("u1", None);
        let other = Identity::new("u2", Some("u2@example.com".into()));
        assert!(can_mutate(Some(&owner), &beach));
        assert!(!can_mutate(Some(&other), &beach));
        assert!(!can_mutate(None, &beach));
    }

    #[test]
    fn uid_comparison_is_exact() {
        let beach = post("u1");
        assert!(!can_mutate(Some(&Identity::new("U1", None)), &beach));
        assert!(!can_mutate(Some(&Identity::new("u1 ", None)), &beach));
    }

    #[test]
    fn affordances_follow_ownership() {
        let beach = post("u1");
        assert_eq!(
            Affordances::for_post(Some(&Identity::new("u2", None)), &beach),
            Affordances::default()
        );
        assert_eq!(
            Affordances::for_post(Some(&Identity::new("u1", None)), &beach),
            Affordances {
                can_edit: true,
                can_delete: true,
            }
        );
    }

    #[test]
    fn ensure_reports_reason() {
        let beach = post("u1");
        let err = ensure_can_mutate(None, &beach).unwrap_err();
        assert!(err.to_string().contains("sign in"));
        let err = ensure_can_mutate(Some(&Identity::new("u2", None)), &beach).unwrap_err();
        assert!(err.to_string().contains("only the owner"));
        assert!(ensure_can_mutate(Some(&Identity::new("u1", None)), &beach).is_ok());
    }
}
