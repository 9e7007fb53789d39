#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod source;
mod wire;

// ============================================================================
// Public API
// ============================================================================

// Adapters
pub use client::HttpSpeechClient;
pub use source::HttpArtifactSource;

// Configuration
pub use config::HttpClientConfig;

// Errors
pub use error::{HttpError, HttpResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockito as _;
