use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SearchError;

/// Top-level body returned by `search.messages`.
///
/// Slack omits `query` and `messages` when `ok` is false, so both fall back to
/// their defaults and the `error` code is carried instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub messages: MessagePage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    /// Matches of a successful search, `None` for an error envelope.
    #[must_use]
    pub fn matches(&self) -> Option<&[MatchedMessage]> {
        self.ok.then_some(self.messages.matches.as_slice())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub matches: Vec<MatchedMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total_count: u64,
    pub page: u32,
    pub per_page: u32,
    pub first: u64,
    pub last: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paging {
    pub count: u32,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedMessage {
    #[serde(default)]
    pub iid: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub score: f64,
    pub channel: Channel,
    #[serde(rename = "type", default = "default_match_type")]
    pub kind: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub username: String,
    pub ts: TimeStamp,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub permalink: String,
}

fn default_match_type() -> String {
    "message".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Slack message timestamp in its wire form, `"<seconds>.<micros>"`.
///
/// The raw string is kept as-is. Strings with equally long fractional parts
/// compare lexicographically in the same order as their numeric values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeStamp(pub String);

impl TimeStamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the timestamp into a UTC instant with microsecond precision.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidTimestamp` if either part is not numeric
    /// or the value is outside chrono's representable range.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, SearchError> {
        let invalid = || SearchError::InvalidTimestamp(self.0.clone());

        let (secs_part, frac_part) = self.0.split_once('.').unwrap_or((self.0.as_str(), ""));
        let secs: i64 = secs_part.parse().map_err(|_| invalid())?;

        if !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        // Anything past nanoseconds is dropped.
        let digits: String = frac_part.chars().take(9).collect();
        let nanos = if digits.is_empty() {
            0
        } else {
            let scale = 10u32.pow(9 - u32::try_from(digits.len()).map_err(|_| invalid())?);
            digits.parse::<u32>().map_err(|_| invalid())? * scale
        };

        DateTime::<Utc>::from_timestamp(secs, nanos).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeStamp {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
