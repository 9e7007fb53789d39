//! Save sink port - where finished downloads are handed off.

use async_trait::async_trait;

use crate::download::{DownloadError, SaveAction, SavedArtifact};

/// Carries out save actions (a file write, a browser download, ...).
///
/// Sinks receiving [`SaveTarget::Locator`](crate::download::SaveTarget)
/// resolve the locator themselves.
#[async_trait]
pub trait SaveSinkPort: Send + Sync {
    async fn save(&self, action: SaveAction) -> Result<SavedArtifact, DownloadError>;
}
