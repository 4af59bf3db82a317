use std::error::Error;
use slack_search::errors::SearchError;

#[test]
fn test_search_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SearchError::DecodeError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_search_error_display() {
    let error = SearchError::HttpError("Connection refused".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection refused"
    );

    let error = SearchError::DecodeError("expected value".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to decode Slack response: expected value"
    );

    let error = SearchError::InvalidTimestamp("abc".to_string());
    assert_eq!(format!("{error}"), "Invalid Slack timestamp: abc");
}

#[test]
fn test_search_error_from_conversions() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: SearchError = json_err.into();
    assert!(matches!(err, SearchError::DecodeError(_)));

    let url_err = url::Url::parse("::").unwrap_err();
    let err: SearchError = url_err.into();
    assert!(matches!(err, SearchError::InvalidUrl(_)));

    // reqwest::Error cannot be built by hand; this only checks the impl exists.
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SearchError {
        SearchError::from(err)
    }
}
