use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AuthError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| unreachable!("email regex: {e}"))
});

const MIN_PASSWORD_LEN: usize = 6;

/// Email/password pair, normalized and checked before it reaches the
/// identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Normalize and validate a credential pair.
    ///
    /// The email is trimmed and lower-cased (mobile keyboards add stray
    /// spaces and capitals).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] when a field is empty, the email is
    /// malformed, or the password is shorter than six characters.
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput("Please fill in all fields".into()));
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(AuthError::InvalidInput(
                "Please enter a valid email address (e.g., example@email.com)".into(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
