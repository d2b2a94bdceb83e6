//! Posts as exchanged with the posts service.
//!
//! Wire shape: `{ id, title, image_url, user_uid, created_at? }`. The service
//! emits `created_at` either as RFC 3339 or as a naive ISO-8601 timestamp
//! (interpreted as UTC); both decode.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned post id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single shared photo entry. The service is the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    /// Absolute URL of the hosted image.
    pub image_url: String,
    /// Uid of the creating identity. Never changes after creation.
    #[serde(rename = "user_uid")]
    pub owner_uid: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Owner uid shortened for display: first 8 characters, then `...`.
    #[must_use]
    pub fn short_owner(&self) -> String {
        let prefix: String = self.owner_uid.chars().take(8).collect();
        format!("{prefix}...")
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| serde::de::Error::custom(format!("invalid created_at '{raw}': {e}")))
}
