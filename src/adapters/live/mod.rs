//! Live adapters calling the Google Generative Language API.

pub mod gemini;
pub mod imagen;

use serde::Deserialize;

use crate::error::ServiceError;

/// Default API host; tests point adapters at a local mock server instead.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Longest slice of a response body quoted in error messages.
const MAX_BODY_EXCERPT: usize = 500;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Build an [`ServiceError::Api`] from a non-success response body.
///
/// Google error envelopes contribute their `error.message`; any other body
/// is quoted verbatim (truncated).
pub(crate) fn api_error(status: u16, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| excerpt(body), |envelope| envelope.error.message);
    ServiceError::Api { status, message }
}

/// Truncate a body for inclusion in an error message.
pub(crate) fn excerpt(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_uses_google_envelope() {
        let body = r#"{"error": {"code": 429, "message": "rate limited", "status": "RESOURCE_EXHAUSTED"}}"#;
        match api_error(429, body) {
            ServiceError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_quotes_plain_body() {
        match api_error(502, "bad gateway") {
            ServiceError::Api { message, .. } => assert_eq!(message, "bad gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(600);
        let short = excerpt(&long);
        assert_eq!(short.len(), MAX_BODY_EXCERPT + 3);
        assert!(short.ends_with("..."));
        assert_eq!(excerpt("tiny"), "tiny");
    }
}
