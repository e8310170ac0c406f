//! API boundary error types.

use thiserror::Error;

/// Errors from the external inscription service.
///
/// `Display` output is for logs. Anything shown to a user goes through
/// [`ApiError::user_message`], which never leaks raw wire or library text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service answered HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("malformed service response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The client itself could not be constructed.
    #[error("http client setup failed: {0}")]
    ClientSetup(#[source] reqwest::Error),
}

impl ApiError {
    /// Human-readable message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) => {
                "Could not reach the inscription service. Check your connection and try again."
            },
            Self::Status { .. } => {
                "The inscription service could not process the request. Please try again."
            },
            Self::Decode(_) | Self::ClientSetup(_) => {
                "Something went wrong talking to the inscription service. Please try again."
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_status_display_names_the_code() {
        let err = ApiError::Status { status: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_user_message_hides_status_code() {
        let err = ApiError::Status { status: 503 };
        assert!(!err.user_message().contains("503"));
    }
}
