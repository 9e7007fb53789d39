//! Save sink writing into a local directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use tracing::{debug, info};

use ttsdeck_core::{
    ArtifactSourcePort, DownloadError, Locator, SaveAction, SaveSinkPort, SaveTarget,
    SavedArtifact,
};
use ttsdeck_synth::ArtifactRegistry;

/// Writes save actions as files under a fixed directory.
///
/// Assembled bytes are written as-is. Locator targets are resolved like a
/// plain link: `blob:` locators through the registry, anything else through
/// `remote`.
pub struct DirectorySaveSink {
    dir: PathBuf,
    registry: Arc<ArtifactRegistry>,
    remote: Arc<dyn ArtifactSourcePort>,
}

impl DirectorySaveSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        registry: Arc<ArtifactRegistry>,
        remote: Arc<dyn ArtifactSourcePort>,
    ) -> Self {
        Self {
            dir: dir.into(),
            registry,
            remote,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, DownloadError> {
        if locator.is_blob() {
            return self
                .registry
                .resolve(locator)
                .map(|artifact| artifact.bytes.to_vec())
                .ok_or_else(|| DownloadError::save(format!("{locator} no longer resolves")));
        }

        let stream = self.remote.open(locator).await?;
        stream
            .chunks
            .try_fold(Vec::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok(acc)
            })
            .await
    }
}

#[async_trait]
impl SaveSinkPort for DirectorySaveSink {
    async fn save(&self, action: SaveAction) -> Result<SavedArtifact, DownloadError> {
        let bytes = match &action.target {
            SaveTarget::Assembled(bytes) => bytes.to_vec(),
            SaveTarget::Locator(locator) => {
                debug!(%locator, "resolving locator for direct save");
                self.fetch(locator).await?
            }
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;
        let path = self.dir.join(&action.filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;

        info!(path = %path.display(), bytes = bytes.len(), "wrote audio file");
        Ok(SavedArtifact {
            filename: action.filename,
            path: Some(path),
            bytes_written: bytes.len() as u64,
        })
    }
}
