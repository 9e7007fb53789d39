//! Synthesis request lifecycle types.
//!
//! ```text
//!   Idle ──start──▶ Requesting ──ok──────▶ Ready(handle)
//!    ▲                  │ ├──cancel────▶ Cancelled
//!    │                  │ └──error─────▶ Failed(kind, message)
//!    └──clear───────────┴─ (any state) ──start──▶ Requesting
//! ```

mod errors;
mod notice;
mod state;

pub use errors::{FailureKind, SynthesisError};
pub use notice::{NoticeLevel, StatusNotice};
pub use state::SynthesisState;
