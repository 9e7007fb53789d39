//! In-process artifact registry backing `blob:` locators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use tracing::debug;

use ttsdeck_core::{
    Artifact, ArtifactSourcePort, ArtifactStream, DownloadError, HandleId, Locator,
};

use super::{HandleLiveness, ResourceHandle};

/// Chunk size used when streaming a bound artifact.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Lifecycle manager for resource handles.
///
/// Holds the bytes of every live handle, keyed by handle id. Handles are
/// created with [`create`](Self::create) and removed when revoked. The
/// registry is also the [`ArtifactSourcePort`] for its own locators.
#[derive(Debug)]
pub struct ArtifactRegistry {
    bindings: Mutex<HashMap<HandleId, Artifact>>,
    chunk_size: usize,
}

impl ArtifactRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Create a registry that streams artifacts in chunks of `chunk_size`
    /// bytes (minimum 1).
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
            chunk_size: chunk_size.max(1),
        }
    }

    fn bindings(&self) -> MutexGuard<'_, HashMap<HandleId, Artifact>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind `artifact` to a fresh locator and return the live handle.
    pub fn create(self: &Arc<Self>, artifact: Artifact) -> ResourceHandle {
        let handle = ResourceHandle::bind(Arc::clone(self), &artifact);
        debug!(handle = %handle.id(), size = handle.size(), "bound artifact");
        self.bindings().insert(handle.id(), artifact);
        handle
    }

    /// Revoke `handle`. Harmless if it was already revoked.
    pub fn revoke(&self, handle: &mut ResourceHandle) -> bool {
        handle.revoke()
    }

    pub(crate) fn release(&self, id: HandleId) {
        if self.bindings().remove(&id).is_some() {
            debug!(handle = %id, "released artifact binding");
        }
    }

    /// Look up the artifact a locator is bound to.
    pub fn resolve(&self, locator: &Locator) -> Option<Artifact> {
        let bindings = self.bindings();
        bindings
            .iter()
            .find(|(id, _)| id.locator() == *locator)
            .map(|(_, artifact)| artifact.clone())
    }

    #[must_use]
    pub fn is_live(&self, id: HandleId) -> bool {
        self.bindings().contains_key(&id)
    }

    /// Number of handles currently bound.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.bindings().len()
    }

    fn split(&self, bytes: &Bytes) -> Vec<Bytes> {
        (0..bytes.len())
            .step_by(self.chunk_size)
            .map(|start| bytes.slice(start..(start + self.chunk_size).min(bytes.len())))
            .collect()
    }
}

impl Default for ArtifactRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleLiveness for ArtifactRegistry {
    fn is_live(&self, id: HandleId) -> bool {
        Self::is_live(self, id)
    }
}

#[async_trait]
impl ArtifactSourcePort for ArtifactRegistry {
    async fn open(&self, locator: &Locator) -> Result<ArtifactStream, DownloadError> {
        let artifact = self
            .resolve(locator)
            .ok_or_else(|| DownloadError::acquire(format!("{locator} is not bound")))?;
        let chunks = self.split(&artifact.bytes);
        Ok(ArtifactStream {
            content_length: Some(artifact.len() as u64),
            chunks: stream::iter(chunks.into_iter().map(Ok)).boxed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(stream: ArtifactStream) -> Vec<Bytes> {
        stream
            .chunks
            .map(|chunk| chunk.unwrap())
            .collect::<Vec<_>>()
            .await
    }

    #[tokio::test]
    async fn test_open_streams_chunks_with_length() {
        let registry = Arc::new(ArtifactRegistry::with_chunk_size(200));
        let handle = registry.create(Artifact::new(vec![7u8; 500]));

        let stream = registry.open(handle.locator()).await.unwrap();
        assert_eq!(stream.content_length, Some(500));

        let sizes: Vec<usize> = collect(stream).await.iter().map(Bytes::len).collect();
        assert_eq!(sizes, vec![200, 200, 100]);
    }

    #[tokio::test]
    async fn test_each_open_is_independent() {
        let registry = Arc::new(ArtifactRegistry::with_chunk_size(3));
        let handle = registry.create(Artifact::new(b"abcdefg".to_vec()));

        let first = collect(registry.open(handle.locator()).await.unwrap()).await;
        let second = collect(registry.open(handle.locator()).await.unwrap()).await;
        assert_eq!(first, second);
        assert_eq!(first.concat(), b"abcdefg");
    }

    #[tokio::test]
    async fn test_open_revoked_locator_fails() {
        let registry = Arc::new(ArtifactRegistry::new());
        let mut handle = registry.create(Artifact::new(vec![1u8; 10]));
        let locator = handle.locator().clone();
        registry.revoke(&mut handle);

        let err = registry.open(&locator).await.unwrap_err();
        assert!(matches!(err, DownloadError::Acquire { .. }));
    }

    #[tokio::test]
    async fn test_empty_artifact_yields_no_chunks() {
        let registry = Arc::new(ArtifactRegistry::new());
        let handle = registry.create(Artifact::new(Vec::new()));
        let stream = registry.open(handle.locator()).await.unwrap();
        assert_eq!(stream.content_length, Some(0));
        assert!(collect(stream).await.is_empty());
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let registry = ArtifactRegistry::with_chunk_size(0);
        assert_eq!(registry.split(&Bytes::from_static(b"ab")).len(), 2);
    }

    #[test]
    fn test_liveness_trait() {
        let registry = Arc::new(ArtifactRegistry::new());
        let handle = registry.create(Artifact::new(vec![0u8; 1]));
        let liveness: &dyn HandleLiveness = registry.as_ref();
        assert!(liveness.is_live(handle.id()));
        assert!(!liveness.is_live(HandleId::new()));
    }
}
