//! The synthesis state machine value.

use serde::{Deserialize, Serialize};

use super::FailureKind;
use crate::domain::HandleRef;

/// Current state of the synthesis controller.
///
/// Exactly one instance exists per controller and only the controller
/// transitions it. Presentation layers read it by subscription.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SynthesisState {
    /// Nothing requested yet, or cleaned up.
    #[default]
    Idle,

    /// A request is in flight.
    Requesting,

    /// The artifact is bound to a live handle.
    Ready { handle: HandleRef },

    /// The user cancelled the last request.
    Cancelled,

    /// The last request failed.
    Failed { kind: FailureKind, message: String },
}

impl SynthesisState {
    #[must_use]
    pub const fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting)
    }

    /// The handle bound in `Ready`, if any.
    #[must_use]
    pub const fn handle(&self) -> Option<&HandleRef> {
        match self {
            Self::Ready { handle } => Some(handle),
            _ => None,
        }
    }

    /// Short label for logs and status lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Ready { .. } => "ready",
            Self::Cancelled => "cancelled",
            Self::Failed { .. } => "failed",
        }
    }
}
