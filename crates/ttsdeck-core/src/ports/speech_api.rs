//! Speech API port - the cancellable synthesis exchange.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::{Artifact, SynthesisRequest};

/// Errors returned by a speech API implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechApiError {
    /// The server answered with a non-success status.
    ///
    /// `message` is the `error` field of the JSON body when present,
    /// otherwise the status text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// The token was signalled before the exchange finished.
    #[error("request cancelled")]
    Cancelled,
}

/// A cancellable request/response exchange that yields a binary artifact.
///
/// Implementations must consult `cancel` at each suspension point (sending
/// the request, reading the body) and return [`SpeechApiError::Cancelled`]
/// once it is signalled. A transfer that finishes anyway may be returned;
/// callers discard results for signalled tokens.
#[async_trait]
pub trait SpeechApiPort: Send + Sync {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> Result<Artifact, SpeechApiError>;
}
