//! CLI-specific error types and mappings.
//!
//! This module maps synthesis, download and adapter errors to exit codes and
//! user-facing messages.

use thiserror::Error;

use ttsdeck_core::{DownloadError, SynthesisError};
use ttsdeck_http::HttpError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The request was rejected before it was sent.
    #[error("{0}")]
    Validation(String),

    /// The speech backend answered with an error.
    #[error("Error: {0}")]
    Server(String),

    /// The speech backend could not be reached.
    #[error("Error: {0}")]
    Transport(String),

    /// IO error (file not writable, directory missing, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The user interrupted the request.
    #[error("Speech generation cancelled")]
    Cancelled,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Terminated by Ctrl-C
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Server(_) => 1,
            Self::Validation(_) => 2,  // EX_USAGE
            Self::Transport(_) => 69,  // EX_UNAVAILABLE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,     // EX_CONFIG
            Self::Cancelled => 130,
        }
    }
}

impl From<SynthesisError> for CliError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Validation(e) => Self::Validation(e.to_string()),
            SynthesisError::Server { .. } => Self::Server(err.to_string()),
            SynthesisError::Transport { .. } => Self::Transport(err.to_string()),
            SynthesisError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
