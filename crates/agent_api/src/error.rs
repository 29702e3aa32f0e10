use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Error as JsonError, Value};

#[derive(Debug)]
pub enum AgentApiError {
    InvalidBaseUrl(String),
    InvalidBearerToken(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Decode(JsonError),
    Cancelled,
}

/// Error body shape emitted by the agent service: `{"detail": ...}`.
///
/// `detail` is usually a string, but request-validation failures carry a
/// structured value. Both are normalized to one human-readable message.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub detail: Option<Value>,
}

impl ErrorPayload {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::String(_) | Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for AgentApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidBearerToken(message) => write!(f, "invalid bearer token: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Decode(error) => write!(f, "response decode error: {error}"),
            Self::Cancelled => write!(f, "request was cancelled"),
        }
    }
}

impl std::error::Error for AgentApiError {}

impl From<reqwest::Error> for AgentApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for AgentApiError {
    fn from(error: JsonError) -> Self {
        Self::Decode(error)
    }
}

impl AgentApiError {
    /// Returns the single-string message managers surface in error banners.
    ///
    /// For rejected requests this is the server-supplied detail (already
    /// extracted by [`parse_error_message`]); everything else collapses to
    /// the error's display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status(_, message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Extract a human-readable message from a non-2xx response body.
///
/// Priority order: server-supplied `detail` field, else the raw body when
/// non-empty, else the status line's canonical reason, else a generic
/// fallback.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(message) = payload.message() {
            return message;
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{parse_error_message, AgentApiError};

    #[test]
    fn detail_string_wins_over_raw_body() {
        let message = parse_error_message(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Invalid credentials"}"#,
        );
        assert_eq!(message, "Invalid credentials");
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let message = parse_error_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
        );
        assert!(message.contains("field required"));
    }

    #[test]
    fn non_json_body_is_passed_through() {
        let message = parse_error_message(StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(message, "upstream unavailable");
    }

    #[test]
    fn empty_body_falls_back_to_canonical_reason() {
        let message = parse_error_message(StatusCode::NOT_FOUND, "");
        assert_eq!(message, "Not Found");
    }

    #[test]
    fn empty_detail_falls_back_to_body() {
        let message = parse_error_message(StatusCode::BAD_REQUEST, r#"{"detail":""}"#);
        assert_eq!(message, r#"{"detail":""}"#);
    }

    #[test]
    fn user_message_strips_status_prefix() {
        let error = AgentApiError::Status(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials".to_string(),
        );
        assert_eq!(error.user_message(), "Invalid credentials");
    }

    #[test]
    fn user_message_for_cancelled_is_stable() {
        assert_eq!(
            AgentApiError::Cancelled.user_message(),
            "request was cancelled"
        );
    }
}
