//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (401, 429 rate limiting with `Retry-After`
//! parsing, non-success → [`FetchError::Api`]) and body decoding so sources
//! stay focused on request construction.

use lens_core::{Record, records_from_json};
use serde_json::Value;

use crate::error::FetchError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401 Unauthorized** → [`FetchError::Unauthorized`].
/// - **429 Too Many Requests** → [`FetchError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`FetchError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    if resp.status() == 401 {
        return Err(FetchError::Unauthorized);
    }
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(FetchError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(FetchError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

/// Decode a response body into records.
///
/// Accepts a bare JSON array or an envelope object with a `data` array.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] for invalid JSON or an envelope without a
/// `data` array, and [`FetchError::Core`] when elements are not objects.
pub fn parse_records(body: &str) -> Result<Vec<Record>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(format!("invalid JSON: {e}")))?;
    let array = match value {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(data @ Value::Array(_)) => data,
            _ => {
                return Err(FetchError::Parse(
                    "expected an array or an object with a `data` array".to_string(),
                ));
            }
        },
        other => other,
    };
    Ok(records_from_json(array)?)
}

#[cfg(test)]
mod tests {
    use lens_core::{CoreError, FieldSource};
    use serde_json::json;

    use super::*;

    fn mock_response(status: u16) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body("")
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_header() {
        let resp = mock_response(429);
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_unauthorized() {
        let err = check_response(mock_response(401)).await.unwrap_err();
        assert!(matches!(err, FetchError::Unauthorized));
    }

    #[tokio::test]
    async fn check_response_rate_limited_with_header() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_api_error() {
        let err = check_response(mock_response(503)).await.unwrap_err();
        assert!(matches!(err, FetchError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200)).await.is_ok());
    }

    #[test]
    fn parses_bare_arrays_and_envelopes() {
        let bare = parse_records(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(bare.len(), 2);

        let wrapped = parse_records(r#"{"data": [{"id": 1}], "total": 1}"#).unwrap();
        assert_eq!(wrapped.len(), 1);
    }

    #[test]
    fn rejects_non_collections() {
        let err = parse_records("not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        let err = parse_records(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(matches!(parse_records("42"), Err(FetchError::Core(_))));
        assert!(matches!(parse_records("[1, 2]"), Err(FetchError::Core(_))));
    }

    #[test]
    fn records_keep_order_and_fields() {
        let records = parse_records(r#"{"data": [{"id": 2, "name": "B"}, {"id": 1}]}"#).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("name"), Some(&json!("B")));
        assert_eq!(records[1].field("id"), Some(&json!(1)));
    }

    #[test]
    fn bad_element_reports_its_index() {
        let err = parse_records(r#"[{"id": 1}, {"id": 2}, "three"]"#).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Core(CoreError::NotAnObject { index: 2, .. })
        ));

        let err = parse_records("true").unwrap_err();
        assert!(matches!(
            err,
            FetchError::Core(CoreError::NotAnArray { .. })
        ));
    }
}
