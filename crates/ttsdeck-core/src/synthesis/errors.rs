//! Synthesis error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ValidationError;
use crate::ports::SpeechApiError;

/// Category of a terminal synthesis failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The server rejected the request (non-2xx).
    ServerError,
    /// No response was received.
    TransportError,
}

/// Error type for synthesis operations.
///
/// `Cancelled` is a terminal outcome of user intent, not a failure; it is a
/// variant here so callers can match every outcome of a request in one place.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisError {
    /// The request was rejected before any network call.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, passed through verbatim when available.
        message: String,
    },

    /// The request never produced a response.
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The request was cancelled by the user.
    #[error("Speech generation cancelled")]
    Cancelled,
}

impl SynthesisError {
    /// Failure kind for errors that end in `SynthesisState::Failed`.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Server { .. } => Some(FailureKind::ServerError),
            Self::Transport { .. } => Some(FailureKind::TransportError),
            Self::Validation(_) | Self::Cancelled => None,
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<SpeechApiError> for SynthesisError {
    fn from(err: SpeechApiError) -> Self {
        match err {
            SpeechApiError::Status { status, message } => Self::Server { status, message },
            SpeechApiError::Transport(message) => Self::Transport { message },
            SpeechApiError::Cancelled => Self::Cancelled,
        }
    }
}
