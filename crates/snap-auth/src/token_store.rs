use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "travelsnap";
const KEYRING_USER: &str = "firebase-session";
const SESSION_FILE_NAME: &str = "session.json";

/// A signed-in session as persisted between launches.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("id_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Persisted-session storage: OS keychain first, `0600` JSON file second.
#[derive(Debug, Clone)]
pub struct TokenStore {
    keyring_service: Option<String>,
    file: PathBuf,
}

impl TokenStore {
    /// Keychain service `travelsnap` (override via `SNAP_KEYRING_SERVICE`,
    /// e.g. `"travelsnap-test"`) with `~/.travelsnap/session.json` as fallback.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory cannot be resolved.
    pub fn default_location() -> Result<Self, AuthError> {
        let file = dirs::home_dir()
            .map(|h| h.join(".travelsnap").join(SESSION_FILE_NAME))
            .ok_or_else(|| {
                AuthError::TokenStoreError(
                    "home directory not found — cannot store session".into(),
                )
            })?;
        let service = std::env::var("SNAP_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Ok(Self {
            keyring_service: Some(service),
            file,
        })
    }

    /// File-only storage at `path`. Never touches the OS keychain.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            file: path.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file
    }

    /// Persist a session. Falls back to the file if the keychain is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keychain and file storage fail.
    pub fn store(&self, session: &StoredSession) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;

        if let Some(entry) = self.entry() {
            match entry.set_password(&json) {
                Ok(()) if self.keyring_holds(&json) => return Ok(()),
                Ok(()) => {
                    tracing::warn!("keyring accepted the session but does not persist it; falling back to file");
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }
        self.store_file(&json)
    }

    /// Load the persisted session. Keychain first, then file.
    ///
    /// Unreadable or malformed entries are treated as absent.
    #[must_use]
    pub fn load(&self) -> Option<StoredSession> {
        if let Some(entry) = self.entry()
            && let Ok(json) = entry.get_password()
            && let Some(session) = parse_session(&json)
        {
            return Some(session);
        }
        self.load_file()
    }

    /// Remove the persisted session from keychain and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the session file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.entry() {
            // May not exist.
            let _ = entry.delete_credential();
        }
        if self.file.exists() {
            fs::remove_file(&self.file).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", self.file.display()))
            })?;
        }
        Ok(())
    }

    /// Which tier the current session came from (for status display).
    #[must_use]
    pub fn detect_source(&self) -> Option<&'static str> {
        if let Some(entry) = self.entry()
            && entry
                .get_password()
                .is_ok_and(|json| parse_session(&json).is_some())
        {
            return Some("keyring");
        }
        if self.load_file().is_some() {
            return Some("file");
        }
        None
    }

    // --- Private helpers ---

    fn entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    /// A fresh entry reads back `json`. Backends without persistence (the
    /// in-memory fallback on platforms with no native store) fail this.
    fn keyring_holds(&self, json: &str) -> bool {
        self.entry()
            .and_then(|entry| entry.get_password().ok())
            .is_some_and(|stored| stored == json)
    }

    fn store_file(&self, json: &str) -> Result<(), AuthError> {
        let path = &self.file;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, json)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<StoredSession> {
        fs::read_to_string(&self.file)
            .ok()
            .and_then(|json| parse_session(&json))
    }
}

fn parse_session(json: &str) -> Option<StoredSession> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, "ignoring malformed stored session");
            None
        }
    }
}
