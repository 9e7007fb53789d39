//! User-visible status notices.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::Provider;

/// How long a success notice stays visible.
pub const SUCCESS_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

/// How long a cancellation notice stays visible.
pub const CANCELLED_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

/// Styling class of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Work in progress (spinner).
    Loading,
    Success,
    /// Not an error: shown for cancellation.
    Neutral,
    Error,
}

/// A single human-readable status message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub level: NoticeLevel,
    pub message: String,
    /// When set, the presentation layer clears the notice after this long.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "duration_ms")]
    pub clear_after: Option<Duration>,
}

impl StatusNotice {
    #[must_use]
    pub fn requesting(provider: &Provider) -> Self {
        Self {
            level: NoticeLevel::Loading,
            message: format!("Requesting {} to generate speech...", provider.display_name()),
            clear_after: None,
        }
    }

    #[must_use]
    pub fn ready() -> Self {
        Self {
            level: NoticeLevel::Success,
            message: "Speech generated successfully!".to_string(),
            clear_after: Some(SUCCESS_DISPLAY_WINDOW),
        }
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            level: NoticeLevel::Neutral,
            message: "Speech generation cancelled".to_string(),
            clear_after: Some(CANCELLED_DISPLAY_WINDOW),
        }
    }

    /// Failure notice; stays until the next request replaces it.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: format!("Error: {message}"),
            clear_after: None,
        }
    }

    /// Validation notice; the message is shown as-is.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            clear_after: None,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
