//! Synthesized audio artifacts and the identities used to refer to them.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The synthesized binary audio payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Bytes,
    /// MIME type reported by the server, if any.
    pub content_type: Option<String>,
}

impl Artifact {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension for saving this artifact.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        extension_for(self.content_type.as_deref())
    }
}

/// Map a MIME type to a file extension, defaulting to `mp3`.
#[must_use]
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some("audio/wav" | "audio/x-wav" | "audio/wave") => "wav",
        Some("audio/ogg" | "audio/opus") => "ogg",
        Some("audio/flac") => "flac",
        _ => "mp3",
    }
}

/// Identity of a resource handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleId(Uuid);

impl HandleId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The locator a handle with this id is bound to.
    #[must_use]
    pub fn locator(&self) -> Locator {
        Locator(format!("{}{}", Locator::BLOB_PREFIX, self.0))
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A temporary reference resolvable to an artifact's bytes.
///
/// Locators issued for resource handles use the `blob:ttsdeck/` scheme and
/// stop resolving once the handle is revoked. Other schemes (`http`,
/// `https`) point at remote resources.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub const BLOB_PREFIX: &'static str = "blob:ttsdeck/";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blob(&self) -> bool {
        self.0.starts_with(Self::BLOB_PREFIX)
    }

    #[must_use]
    pub fn is_http(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-owning view of a resource handle.
///
/// Playback surfaces and the download tracker hold this instead of the
/// handle itself. Whether the locator still resolves must be checked against
/// the registry that issued it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleRef {
    pub id: HandleId,
    pub locator: Locator,
    /// Size of the bound artifact in bytes.
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl HandleRef {
    #[must_use]
    pub fn extension(&self) -> &'static str {
        extension_for(self.content_type.as_deref())
    }
}
