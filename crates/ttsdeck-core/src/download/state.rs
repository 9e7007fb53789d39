//! Download state and progress values.

use serde::{Deserialize, Serialize};

/// Progress of a running download.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Bytes received so far.
    pub received: u64,
    /// Expected total, from the declared length or the size hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Percentage (0.0 - 100.0), `None` when no total is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl DownloadProgress {
    /// Compute progress for `received` bytes out of an optional total.
    ///
    /// The percentage is capped at 100. A zero total is treated as unknown.
    #[must_use]
    pub fn new(received: u64, total: Option<u64>) -> Self {
        let total = total.filter(|t| *t > 0);
        #[allow(clippy::cast_precision_loss)]
        let percent = total.map(|t| (received as f64 * 100.0 / t as f64).min(100.0));
        Self {
            received,
            total,
            percent,
        }
    }

    /// The terminal progress value of a completed download.
    #[must_use]
    pub const fn finished(received: u64) -> Self {
        Self {
            received,
            total: Some(received),
            percent: Some(100.0),
        }
    }

    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        self.percent.is_none()
    }

    /// Whether this value reached 100%.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.percent.is_some_and(|p| p >= 100.0)
    }
}

/// State of the download operation for one handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DownloadState {
    #[default]
    NotStarted,
    InProgress(DownloadProgress),
    Complete,
    Failed,
}

impl DownloadState {
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress(_))
    }

    #[must_use]
    pub const fn progress(&self) -> Option<&DownloadProgress> {
        match self {
            Self::InProgress(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress(_) => "in_progress",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}
