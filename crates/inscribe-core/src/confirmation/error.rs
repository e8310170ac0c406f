//! Confirmation workflow error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by the confirmation workflow.
#[derive(Debug, Error)]
pub enum ConfirmationError {
    /// No pending record exists for the given cache key.
    #[error("no pending inscription for cache key {cache_key}")]
    RecordNotFound {
        /// The cache key that had no record.
        cache_key: String,
    },

    /// The requested action is not valid in the current state.
    ///
    /// Callers racing the expiry tick treat this as "already handled" and
    /// discard it.
    #[error("cannot {action} from {from_state} state")]
    InvalidTransition {
        /// The state the workflow was in.
        from_state: &'static str,
        /// The action that was requested.
        action: &'static str,
    },

    /// The external service call failed. Recoverable: the workflow returns
    /// to `Ready` and the user may retry.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ConfirmationError {
    /// Human-readable message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RecordNotFound { .. } => {
                "This inscription is no longer pending. Please start a new submission.".to_string()
            },
            Self::InvalidTransition { .. } => {
                "This inscription has already been resolved.".to_string()
            },
            Self::Api(err) => err.user_message().to_string(),
        }
    }
}
