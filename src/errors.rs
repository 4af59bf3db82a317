use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to decode Slack response: {0}")]
    DecodeError(String),

    #[error("Invalid Slack timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid Slack API URL: {0}")]
    InvalidUrl(String),

    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SearchError::DecodeError(error.to_string())
        } else {
            SearchError::HttpError(error.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::DecodeError(error.to_string())
    }
}

impl From<url::ParseError> for SearchError {
    fn from(error: url::ParseError) -> Self {
        SearchError::InvalidUrl(error.to_string())
    }
}
