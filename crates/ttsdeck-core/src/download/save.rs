//! Save actions produced by a finished download.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::Locator;

/// What a save action points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveTarget {
    /// The bytes assembled from the progress-tracked stream.
    Assembled(Bytes),
    /// The handle's existing locator, used when streaming failed.
    Locator(Locator),
}

/// A request to persist an artifact under a file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveAction {
    pub filename: String,
    pub target: SaveTarget,
}

impl SaveAction {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.target, SaveTarget::Locator(_))
    }
}

/// Where a save action ended up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArtifact {
    pub filename: String,
    /// Destination path, when the sink writes to the filesystem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub bytes_written: u64,
}

/// `tts_audio_<unix-millis>.<ext>`
#[must_use]
pub fn timestamped_filename(at: DateTime<Utc>, extension: &str) -> String {
    format!("tts_audio_{}.{extension}", at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamped_filename() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            timestamped_filename(at, "mp3"),
            "tts_audio_1700000000123.mp3"
        );
    }

    #[test]
    fn test_fallback_flag() {
        let assembled = SaveAction {
            filename: "a.mp3".into(),
            target: SaveTarget::Assembled(Bytes::from_static(b"abc")),
        };
        assert!(!assembled.is_fallback());

        let fallback = SaveAction {
            filename: "a.mp3".into(),
            target: SaveTarget::Locator(Locator::new("blob:ttsdeck/x")),
        };
        assert!(fallback.is_fallback());
    }
}
