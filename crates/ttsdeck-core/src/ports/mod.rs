//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the synthesis core expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - Cancellation is passed explicitly as a `CancellationToken`
//! - Emitters never block

pub mod artifact_source;
pub mod event_emitter;
pub mod save_sink;
pub mod speech_api;

pub use artifact_source::{ArtifactSourcePort, ArtifactStream};
pub use event_emitter::{AppEventEmitter, ChannelEmitter, NoopEmitter};
pub use save_sink::SaveSinkPort;
pub use speech_api::{SpeechApiError, SpeechApiPort};
