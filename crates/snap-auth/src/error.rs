use snap_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials rejected before contacting the provider.
    #[error("{0}")]
    InvalidInput(String),

    #[error("No account found with this email. Try Sign Up instead.")]
    AccountNotFound,

    #[error("Incorrect password. Please try again.")]
    WrongPassword,

    #[error("An account with this email already exists. Try Login instead.")]
    EmailInUse,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// The persisted session can no longer be refreshed.
    #[error("session expired — sign in again")]
    SessionExpired,

    /// Any other error code returned by the identity provider.
    #[error("identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a body we could not decode.
    #[error("unexpected identity provider response: {0}")]
    Protocol(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("identity provider is not configured — set SNAP_IDENTITY__API_KEY")]
    NotConfigured,
}

impl AuthError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::NotConfigured => ErrorKind::Validation,
            Self::AccountNotFound
            | Self::WrongPassword
            | Self::EmailInUse
            | Self::InvalidEmail
            | Self::InvalidCredentials
            | Self::SessionExpired
            | Self::Provider { .. } => ErrorKind::Server,
            Self::Http(_) => ErrorKind::Network,
            Self::Protocol(_) | Self::TokenStoreError(_) => ErrorKind::Protocol,
        }
    }

    /// Map a Firebase error message (`"EMAIL_NOT_FOUND"`,
    /// `"WEAK_PASSWORD : Password should be at least 6 characters"`, ...) to
    /// the user-facing variant.
    #[must_use]
    pub fn from_provider_code(status: u16, message: &str) -> Self {
        let code = message
            .split([' ', ':'])
            .find(|part| !part.is_empty())
            .unwrap_or_default();
        match code {
            "EMAIL_NOT_FOUND" => Self::AccountNotFound,
            "INVALID_PASSWORD" => Self::WrongPassword,
            "EMAIL_EXISTS" => Self::EmailInUse,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "INVALID_LOGIN_CREDENTIALS" => Self::InvalidCredentials,
            "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_DISABLED" | "USER_NOT_FOUND" => {
                Self::SessionExpired
            }
            _ => Self::Provider {
                status,
                message: message.to_string(),
            },
        }
    }
}
