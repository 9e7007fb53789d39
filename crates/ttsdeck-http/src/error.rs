//! Internal error types for HTTP operations.
//!
//! These errors are mapped to core port errors at the boundary.

use thiserror::Error;

use ttsdeck_core::{DownloadError, SpeechApiError};

/// Result type alias for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised by the HTTP adapters.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or the status reason
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configured credential cannot be sent as a header.
    #[error("Invalid header value for {name}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
    },

    /// The locator is not an `http(s)` URL.
    #[error("Unsupported locator: {0}")]
    UnsupportedLocator(String),
}

impl From<HttpError> for SpeechApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, message } => Self::Status { status, message },
            HttpError::Network(e) => Self::Transport(transport_message(&e)),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<HttpError> for DownloadError {
    fn from(err: HttpError) -> Self {
        Self::acquire(err.to_string())
    }
}

/// Short description of a reqwest failure for user-facing messages.
pub(crate) fn transport_message(err: &reqwest::Error) -> String {
    if err.is_connect() {
        "could not connect to the speech server".to_string()
    } else if err.is_timeout() {
        "the speech server timed out".to_string()
    } else {
        err.to_string()
    }
}
