use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A post being composed, before upload.
///
/// Transient: the composer owns it until it is handed to the collection
/// manager, which consumes it whatever the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    /// Local asset reference (file path, `file://` or `http(s)://` URI).
    pub local_asset_uri: Option<String>,
    /// MIME type reported by the picker, if any.
    pub mime_hint: Option<String>,
}

impl Draft {
    #[must_use]
    pub fn new(title: impl Into<String>, local_asset_uri: Option<String>) -> Self {
        Self {
            title: title.into(),
            local_asset_uri,
            mime_hint: None,
        }
    }

    #[must_use]
    pub fn with_mime_hint(mut self, mime: impl Into<String>) -> Self {
        self.mime_hint = Some(mime.into());
        self
    }

    /// Check the draft can be submitted: non-blank title and an image.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        match self.local_asset_uri.as_deref() {
            Some(uri) if !uri.trim().is_empty() => Ok(()),
            _ => Err(CoreError::Validation("Please select an image".into())),
        }
    }
}

/// Reject blank titles.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when `title` is empty after trimming.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title cannot be empty".into()));
    }
    Ok(())
}
