//! Download-with-progress types.
//!
//! A download re-acquires an existing artifact as a byte stream and saves
//! it. Its state is independent of the synthesis state:
//!
//! ```text
//!   NotStarted ──run──▶ InProgress(p₀) ──▶ … ──▶ InProgress(100) ──▶ Complete
//!        ▲                   │                                          │
//!        │                   └── save failed ──▶ Failed                │
//!        └──────────────────────── cooldown ────────────────────────────┘
//! ```

mod errors;
mod save;
mod state;

pub use errors::DownloadError;
pub use save::{SaveAction, SaveTarget, SavedArtifact, timestamped_filename};
pub use state::{DownloadProgress, DownloadState};
