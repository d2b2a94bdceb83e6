use snap_auth::{AuthError, SessionStore};
use snap_core::Identity;

use crate::collaborators::{Confirm, ConfirmPrompt};

/// Profile screen data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    /// Email, or "Not available".
    pub email: String,
    /// Avatar letter.
    pub initial: char,
    pub uid: String,
}

impl ProfileView {
    #[must_use]
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            email: identity.display_email().to_string(),
            initial: identity.initial(),
            uid: identity.uid.clone(),
        }
    }
}

/// Sign out after the user confirms. Returns whether a sign-out happened.
///
/// # Errors
///
/// Returns the session store's `AuthError`.
pub async fn sign_out_confirmed(
    session: &SessionStore,
    confirm: &dyn Confirm,
) -> Result<bool, AuthError> {
    if !confirm.confirm(&ConfirmPrompt::sign_out()).await {
        return Ok(false);
    }
    session.sign_out().await?;
    Ok(true)
}
