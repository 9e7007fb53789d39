//! Domain types for speech synthesis.
//!
//! Pure data types with no I/O dependencies.

mod artifact;
mod provider;
mod request;

pub use artifact::{Artifact, HandleId, HandleRef, Locator};
pub use provider::{Provider, VoiceInfo};
pub use request::{SynthesisRequest, ValidationError};
