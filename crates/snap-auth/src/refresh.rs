use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Refresh when the ID token expires within this window.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Decode the JWT `exp` claim without signature validation.
///
/// The ID token is only used to decide when to refresh; the identity
/// provider validates it server-side.
///
/// # Errors
///
/// Returns `AuthError::Protocol` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Protocol("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Protocol(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Protocol(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Protocol("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Protocol("invalid exp timestamp".into()))
}

/// Whether a token needs refreshing at `now`. Undecodable tokens always do.
#[must_use]
pub fn needs_refresh(id_token: &str, now: DateTime<Utc>) -> bool {
    match decode_expiry(id_token) {
        Ok(exp) => exp.signed_duration_since(now).num_seconds() <= EXPIRY_BUFFER_SECS,
        Err(_) => true,
    }
}

#[cfg(test)]
pub(crate) fn make_jwt_with_exp(exp: i64) -> String {
    let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#);
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(format!(r#"{{"user_id":"u1","exp":{exp}}}"#));
    let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("fake_sig");
    format!("{header}.{payload}.{signature}")
}
