//! Application events - discriminated union for everything a presentation
//! layer renders.
//!
//! The frontend handles this as a tagged union:
//!
//! ```typescript
//! type AppEvent =
//!   | { type: "synthesis_state_changed"; state: SynthesisState }
//!   | { type: "notice"; notice: StatusNotice }
//!   | { type: "download_state_changed"; handle_id: string; state: DownloadState }
//!   | { type: "download_progress"; handle_id: string; received: number; total?: number; percent?: number }
//!   | { type: "save_issued"; handle_id: string; filename: string; fallback: boolean };
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::HandleId;
use crate::download::{DownloadProgress, DownloadState};
use crate::synthesis::{StatusNotice, SynthesisState};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// The synthesis controller transitioned.
    SynthesisStateChanged { state: SynthesisState },

    /// A status message should be shown.
    Notice { notice: StatusNotice },

    /// A download changed state.
    DownloadStateChanged {
        handle_id: HandleId,
        state: DownloadState,
    },

    /// A chunk arrived.
    DownloadProgress {
        handle_id: HandleId,
        #[serde(flatten)]
        progress: DownloadProgress,
    },

    /// A save action was handed to the sink.
    SaveIssued {
        handle_id: HandleId,
        filename: String,
        /// Whether the direct-locator fallback was used.
        fallback: bool,
    },
}

impl AppEvent {
    pub fn synthesis_state(state: SynthesisState) -> Self {
        Self::SynthesisStateChanged { state }
    }

    pub fn notice(notice: StatusNotice) -> Self {
        Self::Notice { notice }
    }

    pub fn download_state(handle_id: HandleId, state: DownloadState) -> Self {
        Self::DownloadStateChanged { handle_id, state }
    }

    pub fn download_progress(handle_id: HandleId, progress: DownloadProgress) -> Self {
        Self::DownloadProgress {
            handle_id,
            progress,
        }
    }

    pub fn save_issued(handle_id: HandleId, filename: impl Into<String>, fallback: bool) -> Self {
        Self::SaveIssued {
            handle_id,
            filename: filename.into(),
            fallback,
        }
    }

    /// Event name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SynthesisStateChanged { .. } => "synthesis_state_changed",
            Self::Notice { .. } => "notice",
            Self::DownloadStateChanged { .. } => "download_state_changed",
            Self::DownloadProgress { .. } => "download_progress",
            Self::SaveIssued { .. } => "save_issued",
        }
    }
}
