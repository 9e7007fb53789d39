//! The synthesis request value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Provider;

/// Reasons a request is rejected before any network call.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ValidationError {
    /// The text is empty or whitespace only.
    #[error("Please enter text to convert.")]
    EmptyText,

    /// No voice was selected.
    #[error("Please select a voice.")]
    EmptyVoice,

    /// The voice is not part of the provider's catalog.
    #[error("Voice '{voice}' is not available for {provider}")]
    UnknownVoice { provider: String, voice: String },
}

/// An immutable request to synthesize speech.
///
/// Built at submit time from the raw form values. The text is trimmed on
/// construction; [`validate`](Self::validate) checks the remaining
/// constraints without touching the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    text: String,
    #[serde(rename = "service")]
    provider: Provider,
    voice: String,
}

impl SynthesisRequest {
    pub fn new(text: impl AsRef<str>, provider: Provider, voice: impl Into<String>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            provider,
            voice: voice.into(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    #[must_use]
    pub fn voice(&self) -> &str {
        &self.voice
    }

    /// Check the request can be sent.
    ///
    /// Text is checked first so a blank form always reports `EmptyText`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if self.voice.trim().is_empty() {
            return Err(ValidationError::EmptyVoice);
        }
        if !self.provider.supports_voice(&self.voice) {
            return Err(ValidationError::UnknownVoice {
                provider: self.provider.display_name().to_string(),
                voice: self.voice.clone(),
            });
        }
        Ok(())
    }
}
