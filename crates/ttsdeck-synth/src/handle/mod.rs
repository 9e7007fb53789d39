//! Revocable resource handles.
//!
//! A [`ResourceHandle`] binds an [`Artifact`] to a `blob:` locator inside an
//! [`ArtifactRegistry`]. The binding lives until the handle is revoked,
//! either explicitly or when the handle is dropped. Revoking is idempotent.
//!
//! Everything outside the owner refers to a handle through a
//! [`HandleRef`] and asks the registry (via [`HandleLiveness`]) whether the
//! locator still resolves.

mod registry;

use std::sync::Arc;

use ttsdeck_core::{Artifact, HandleId, HandleRef, Locator};

pub use registry::{ArtifactRegistry, DEFAULT_CHUNK_SIZE};

/// Answers whether a handle's locator still resolves.
pub trait HandleLiveness: Send + Sync {
    fn is_live(&self, id: HandleId) -> bool;
}

/// An owned, revocable reference to a synthesized artifact.
#[derive(Debug)]
pub struct ResourceHandle {
    id: HandleId,
    locator: Locator,
    size: u64,
    content_type: Option<String>,
    live: bool,
    registry: Arc<ArtifactRegistry>,
}

impl ResourceHandle {
    pub(crate) fn bind(registry: Arc<ArtifactRegistry>, artifact: &Artifact) -> Self {
        let id = HandleId::new();
        Self {
            id,
            locator: id.locator(),
            size: artifact.len() as u64,
            content_type: artifact.content_type.clone(),
            live: true,
            registry,
        }
    }

    #[must_use]
    pub const fn id(&self) -> HandleId {
        self.id
    }

    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Non-owning view handed to playback surfaces and the download tracker.
    #[must_use]
    pub fn handle_ref(&self) -> HandleRef {
        HandleRef {
            id: self.id,
            locator: self.locator.clone(),
            size: self.size,
            content_type: self.content_type.clone(),
        }
    }

    /// Release the locator binding.
    ///
    /// Returns `true` if this call released it, `false` if the handle was
    /// already revoked.
    pub fn revoke(&mut self) -> bool {
        if !self.live {
            return false;
        }
        self.live = false;
        self.registry.release(self.id);
        true
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        self.revoke();
    }
}
