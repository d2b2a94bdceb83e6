use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated user identity.
///
/// Produced by `snap-auth` on every sign-in and replaced wholesale on the next
/// auth event; nothing mutates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    /// Stable provider user id (Firebase `localId`).
    pub uid: String,
    /// Profile email, when the provider exposes one.
    pub email: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }

    /// Email for display, with the placeholder the profile screen shows.
    #[must_use]
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("Not available")
    }

    /// Single upper-case initial used for the profile avatar.
    #[must_use]
    pub fn initial(&self) -> char {
        self.email
            .as_deref()
            .and_then(|email| email.chars().next())
            .map_or('?', |c| c.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_email_falls_back() {
        let identity = Identity::new("u1", None);
        assert_eq!(identity.display_email(), "Not available");
        assert_eq!(identity.initial(), '?');
    }

    #[test]
    fn initial_is_uppercased() {
        let identity = Identity::new("u1", Some("alice@example.com".into()));
        assert_eq!(identity.display_email(), "alice@example.com");
        assert_eq!(identity.initial(), 'A');
    }
}
