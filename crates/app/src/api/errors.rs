//! API client errors.

use dacha::checkout::SubmitFailure;
use thiserror::Error;

/// Errors returned by [`StorefrontApi`](super::StorefrontApi) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or its response could not be read.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend responded with status {status}{}", suffix(.message.as_deref()))]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Message extracted from the response body
        message: Option<String>,
    },

    /// A success response carried an unexpected body.
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured API base URL is not usable.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

fn suffix(message: Option<&str>) -> String {
    message.map(|message| format!(": {message}")).unwrap_or_default()
}

impl ApiError {
    /// Whether the backend answered with the given status.
    pub fn is_status(&self, expected: u16) -> bool {
        matches!(self, ApiError::Rejected { status, .. } if *status == expected)
    }
}

impl From<ApiError> for SubmitFailure {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Rejected { message, .. } => SubmitFailure::Rejected { message },
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::InvalidBaseUrl(_) => {
                SubmitFailure::Connection
            }
        }
    }
}
