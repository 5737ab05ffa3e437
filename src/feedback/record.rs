//! # Feedback Record
//!
//! The single persisted entity. Field names on the wire and on disk are
//! camelCase; `userAgent` from older data files is accepted as `clientInfo`.
//! Older files may also carry fractional ratings, so the stored rating is kept
//! as the JSON number it was written as. New submissions are always integral.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Client identity recorded when the request declares none
pub const UNKNOWN_CLIENT: &str = "Unknown";

/// A stored feedback entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: u64,
    pub rating: Number,
    pub comment: String,
    #[serde(with = "iso8601_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "userAgent", default = "unknown_client")]
    pub client_info: String,
}

fn unknown_client() -> String {
    UNKNOWN_CLIENT.to_string()
}

/// A feedback entry that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
    pub client_info: String,
}

impl NewFeedback {
    /// Stamp a validated submission with the current time.
    ///
    /// The timestamp is truncated to milliseconds, the precision it is stored
    /// with, so a record reloaded from disk compares equal. An absent or empty
    /// client identity is recorded as [`UNKNOWN_CLIENT`].
    pub fn now(rating: u8, comment: impl Into<String>, client_info: Option<&str>) -> Self {
        let client_info = client_info
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_CLIENT)
            .to_string();

        Self {
            rating,
            comment: comment.into(),
            timestamp: Utc::now().trunc_subsecs(3),
            client_info,
        }
    }

    /// Complete the record with its assigned id
    pub fn with_id(self, id: u64) -> FeedbackRecord {
        FeedbackRecord {
            id,
            rating: Number::from(self.rating),
            comment: self.comment,
            timestamp: self.timestamp,
            client_info: self.client_info,
        }
    }
}

/// `2025-01-02T03:04:05.678Z` on output, any RFC 3339 offset on input.
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
