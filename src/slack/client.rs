//! Slack API client module
//!
//! Wraps the one Slack endpoint this crate talks to, `search.messages`.
//! Failures are propagated as-is: there is no retry, no pagination and no
//! special handling of authentication errors.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};
use url::Url;

use crate::core::config::{AppConfig, DEFAULT_API_BASE_URL};
use crate::core::models::SearchEnvelope;
use crate::errors::SearchError;

/// Slack's `search.messages` method name, appended to the API base URL.
pub const SEARCH_MESSAGES_METHOD: &str = "search.messages";

/// Number of matches requested per search. Only the first page is fetched.
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Sort order requested from Slack.
pub const SEARCH_SORT: &str = "timestamp";

/// Build the full `search.messages` URL for a query.
///
/// The query is percent-encoded but otherwise passed through untouched, so
/// Slack search modifiers such as `from:` or `before:` keep working.
///
/// # Errors
///
/// Returns `SearchError::InvalidUrl` if `base_url` cannot be parsed.
pub fn build_search_url(base_url: &str, query: &str) -> Result<Url, SearchError> {
    let mut url = Url::parse(&format!(
        "{}/{SEARCH_MESSAGES_METHOD}",
        base_url.trim_end_matches('/')
    ))?;

    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("count", &SEARCH_PAGE_SIZE.to_string())
        .append_pair("sort", SEARCH_SORT);

    Ok(url)
}

/// Slack search client bound to a single user token
pub struct SlackClient {
    http: Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        // No timeout is set; requests rely on the platform default.
        Self {
            http: Client::new(),
            token,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.slack_user_token.clone()).with_base_url(&config.api_base_url)
    }

    /// Point the client at a different API root, e.g. a proxy or a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one search and return Slack's envelope unchanged.
    ///
    /// An envelope with `ok: false` is a successful call; checking `ok` is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::HttpError` if the request cannot be sent or the
    /// body cannot be read, and `SearchError::DecodeError` if the body is not
    /// a JSON search envelope.
    pub async fn search(&self, query: &str) -> Result<SearchEnvelope, SearchError> {
        let url = build_search_url(&self.base_url, query)?;
        debug!(query = %query, "Sending search.messages request");

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| SearchError::HttpError(format!("search.messages request failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            SearchError::HttpError(format!("search.messages body read failed: {e}"))
        })?;

        #[cfg(feature = "debug-logs")]
        debug!(status = %status, body = %body, "search.messages raw response");

        let envelope: SearchEnvelope = serde_json::from_str(&body).map_err(|e| {
            SearchError::DecodeError(format!("search.messages HTTP {status}: {e}"))
        })?;

        info!(
            ok = envelope.ok,
            matches = envelope.messages.matches.len(),
            total = envelope.messages.total,
            error = envelope.error.as_deref().unwrap_or(""),
            "search.messages completed"
        );

        Ok(envelope)
    }
}
