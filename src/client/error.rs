//! Error taxonomy for the API client.
//!
//! Backend errors carry a `message` field; when present it is surfaced
//! verbatim to the caller, otherwise a generic fallback is used. Raw bodies
//! and stack traces never reach the user.

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when the backend reply carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "The request could not be completed. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS, or timeout failure before any response arrived.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP response from the backend.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The token refresh failed; all auth state has been cleared.
    #[error("session expired: {0}")]
    SessionExpired(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Payload(String),

    /// The session file could not be written or removed.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Build an API error from a response body, preferring the backend's
    /// `message` field (top-level or nested under `error`).
    pub(crate) fn api_from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error").and_then(|e| e.get("message")))
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        ClientError::Api { status, message }
    }

    /// Status code of an API error, when this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_surfaced() {
        let err = ClientError::api_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"message":"Slug already exists"}"#,
        );
        assert_eq!(err.to_string(), "Slug already exists");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_nested_error_message_is_surfaced() {
        let err = ClientError::api_from_body(
            StatusCode::NOT_FOUND,
            r#"{"error":{"code":"not_found","message":"Category not found"}}"#,
        );
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_unparseable_body_falls_back_to_generic_message() {
        let err = ClientError::api_from_body(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>");
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
    }
}
