#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod events;
pub mod ports;
pub mod synthesis;

// Re-export commonly used types for convenience
pub use domain::{
    Artifact, HandleId, HandleRef, Locator, Provider, SynthesisRequest, ValidationError, VoiceInfo,
};
pub use download::{
    DownloadError, DownloadProgress, DownloadState, SaveAction, SaveTarget, SavedArtifact,
};
pub use events::AppEvent;
pub use ports::{
    AppEventEmitter, ArtifactSourcePort, ArtifactStream, ChannelEmitter, NoopEmitter,
    SaveSinkPort, SpeechApiError, SpeechApiPort,
};
pub use synthesis::{FailureKind, NoticeLevel, StatusNotice, SynthesisError, SynthesisState};

// Re-exported so adapters share the exact token type the ports take
pub use tokio_util::sync::CancellationToken;
