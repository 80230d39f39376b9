//! Errors returned by the admin backend client.

use thiserror::Error;

/// Failure of a single backend call.
///
/// The UI only distinguishes "failed" from "succeeded", but keeping the
/// cause typed lets the session layer react to [`ApiError::Unauthorized`]
/// and lets mutation views surface the server's `detail` message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, CORS, connection reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the bearer token.
    #[error("Session expired")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("{}", .detail.as_deref().unwrap_or("Request failed"))]
    Status { status: u16, detail: Option<String> },

    /// The response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The client was built from an unusable configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The server-provided `detail` string, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether this error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Message to show the user, preferring the server detail and falling back
    /// to `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_builder() {
            ApiError::Config(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_prefers_detail() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("Email already in use".to_string()),
        };
        assert_eq!(err.to_string(), "Email already in use");
        assert_eq!(err.user_message("Failed to update profile"), "Email already in use");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status { status: 500, detail: None };
        assert_eq!(err.to_string(), "Request failed");
        assert_eq!(err.user_message("Failed to change password"), "Failed to change password");
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Failed to delete user"),
            "Failed to delete user"
        );
    }
}
