//! Shared HTTP client construction for collaborator calls.
//!
//! Both remote collaborators (search index, completion service) use a
//! [`reqwest::Client`] with an explicit bounded timeout, so a hung remote
//! call surfaces as a failure instead of a hang.

use crate::error::SearchError;
use std::time::Duration;

/// Header used for API-key authentication by both collaborators.
pub(crate) const API_KEY_HEADER: &str = "api-key";

/// Build a [`reqwest::Client`] with the configured request timeout.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(timeout_seconds: u64) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Extract a human-readable message from a collaborator error body.
///
/// Both collaborators wrap failures as `{"error": {"message": "..."}}`;
/// anything else is returned verbatim.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_timeout() {
        assert!(build_client(30).is_ok());
    }

    #[test]
    fn error_message_extracted_from_wrapper() {
        let body = r#"{"error": {"code": "InvalidRequest", "message": "bad search text"}}"#;
        assert_eq!(extract_error_message(body), "bad search text");
    }

    #[test]
    fn unstructured_body_returned_verbatim() {
        assert_eq!(extract_error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn structured_body_without_message_returned_verbatim() {
        let body = r#"{"status": 503}"#;
        assert_eq!(extract_error_message(body), body);
    }
}
