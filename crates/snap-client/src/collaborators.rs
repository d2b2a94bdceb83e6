//! Platform collaborators the client core calls but does not implement:
//! confirmation dialogs, permission prompts, and image pickers.

use std::fmt;

use async_trait::async_trait;

/// Where an image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Library,
    Camera,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Library => "photo library",
            Self::Camera => "camera",
        })
    }
}

/// An image chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub uri: String,
    pub mime: Option<String>,
}

/// Content of a yes/no confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    /// Label of the destructive button.
    pub action: String,
}

impl ConfirmPrompt {
    #[must_use]
    pub fn delete_post() -> Self {
        Self {
            title: "Delete Post".into(),
            message: "Are you sure you want to delete this post?".into(),
            action: "Delete".into(),
        }
    }

    #[must_use]
    pub fn sign_out() -> Self {
        Self {
            title: "Logout".into(),
            message: "Are you sure you want to logout?".into(),
            action: "Logout".into(),
        }
    }
}

#[async_trait]
pub trait Confirm: Send + Sync {
    /// `true` when the user accepted.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    /// `true` when access to `kind` is granted.
    async fn request(&self, kind: MediaKind) -> bool;
}

#[async_trait]
pub trait MediaSource: Send + Sync {
    /// `None` when the user cancelled the picker.
    async fn pick(&self, kind: MediaKind) -> Option<Asset>;
}
