use api::ApiError;
use thiserror::Error;

/// Outcome of a user-triggered action that did not go through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// Rejected client-side before any request was made.
    #[error("{0}")]
    Invalid(String),

    /// The admin answered "no" to a confirmation.
    #[error("cancelled")]
    Declined,

    /// The backend call failed. `message` is what the user sees.
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl ActionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ActionError::Invalid(message.into())
    }

    /// Wrap a backend failure, showing the server's `detail` when it sent one
    /// and `fallback` otherwise.
    pub fn failed(source: ApiError, fallback: &str) -> Self {
        ActionError::Failed {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, ActionError::Declined)
    }

    /// Whether the session should end because of this failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ActionError::Failed { source, .. } if source.is_unauthorized())
    }
}
