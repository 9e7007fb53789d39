//! Artifact source port - streaming reads over a locator.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::domain::Locator;
use crate::download::DownloadError;

/// A fresh byte stream over an artifact.
pub struct ArtifactStream {
    /// Length declared by the source, if any.
    pub content_length: Option<u64>,
    pub chunks: BoxStream<'static, Result<Bytes, DownloadError>>,
}

impl std::fmt::Debug for ArtifactStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStream")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Re-acquires an artifact as a byte stream.
///
/// Every call to [`open`](Self::open) starts an independent acquisition;
/// nothing is shared with how the artifact was first obtained.
#[async_trait]
pub trait ArtifactSourcePort: Send + Sync {
    async fn open(&self, locator: &Locator) -> Result<ArtifactStream, DownloadError>;
}
