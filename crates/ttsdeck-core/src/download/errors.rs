//! Download error types.
//!
//! Like the rest of the core errors these carry strings instead of source
//! errors so they stay `Clone` and serializable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::HandleId;

/// Error type for download operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// The handle was revoked before the download started.
    #[error("Audio {0} is no longer available")]
    NotLive(HandleId),

    /// The artifact could not be re-acquired as a stream.
    #[error("Failed to open audio stream: {message}")]
    Acquire { message: String },

    /// A chunk read failed mid-stream.
    #[error("Failed to read audio stream: {message}")]
    Read { message: String },

    /// The save action could not be carried out.
    #[error("Failed to save audio: {message}")]
    Save { message: String },
}

impl DownloadError {
    pub fn acquire(message: impl Into<String>) -> Self {
        Self::Acquire {
            message: message.into(),
        }
    }

    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    pub fn save(message: impl Into<String>) -> Self {
        Self::Save {
            message: message.into(),
        }
    }

    /// Capture an I/O error from a save sink.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Save {
            message: format!("{:?}: {err}", err.kind()),
        }
    }
}
