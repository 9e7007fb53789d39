//! Download-with-progress for resource handles.
//!
//! A run re-acquires a handle's artifact through an [`ArtifactSourcePort`],
//! reports progress after every chunk and hands a [`SaveAction`] to a
//! [`SaveSinkPort`]. When the stream cannot be opened or breaks mid-way the
//! save action points at the handle's locator instead.
//!
//! Download state is kept per handle and never touches the synthesis state.
//! `Complete` and `Failed` entries are dropped after the cooldown.

mod progress;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use futures_util::StreamExt;
use tracing::{debug, info, warn};

use ttsdeck_core::download::timestamped_filename;
use ttsdeck_core::{
    AppEvent, AppEventEmitter, ArtifactSourcePort, ArtifactStream, DownloadError,
    DownloadProgress, DownloadState, HandleId, HandleRef, SaveAction, SaveSinkPort, SaveTarget,
    SavedArtifact,
};

use crate::handle::HandleLiveness;

use progress::ProgressAccumulator;

/// How long `Complete` or `Failed` is shown before reverting to `NotStarted`.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(4);

/// Download tracker configuration.
#[derive(Debug, Clone, Copy)]
pub struct DownloadConfig {
    pub cooldown: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl DownloadConfig {
    #[must_use]
    pub const fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Collaborators of the download tracker.
#[derive(Clone)]
pub struct DownloadDeps {
    pub source: Arc<dyn ArtifactSourcePort>,
    pub sink: Arc<dyn SaveSinkPort>,
    pub liveness: Arc<dyn HandleLiveness>,
    pub emitter: Arc<dyn AppEventEmitter>,
}

/// How a call to [`DownloadTracker::run`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The assembled stream was saved.
    Saved(SavedArtifact),
    /// Streaming failed; the locator was saved instead.
    SavedViaFallback(SavedArtifact),
    /// A run for this handle is already in progress. Nothing was done.
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    state: DownloadState,
    /// Identifies the run that last wrote this entry.
    epoch: u64,
}

struct Shared {
    deps: DownloadDeps,
    config: DownloadConfig,
    entries: Mutex<HashMap<HandleId, Entry>>,
    epochs: AtomicU64,
}

/// Tracks download runs per handle.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct DownloadTracker {
    shared: Arc<Shared>,
}

impl DownloadTracker {
    #[must_use]
    pub fn new(deps: DownloadDeps, config: DownloadConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                deps,
                config,
                entries: Mutex::new(HashMap::new()),
                epochs: AtomicU64::new(0),
            }),
        }
    }

    /// Current download state of `id`.
    #[must_use]
    pub fn state(&self, id: HandleId) -> DownloadState {
        self.shared
            .lock()
            .get(&id)
            .map_or(DownloadState::NotStarted, |entry| entry.state)
    }

    /// Download `handle`'s artifact and issue a save action.
    ///
    /// `size_hint` is used as the progress total when the source declares
    /// no length.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::NotLive`] if the handle was revoked (state `Failed`)
    /// - the sink's error if saving failed (state `Failed`)
    ///
    /// Stream failures are not errors; they produce
    /// [`DownloadOutcome::SavedViaFallback`].
    pub async fn run(
        &self,
        handle: &HandleRef,
        size_hint: Option<u64>,
    ) -> Result<DownloadOutcome, DownloadError> {
        let id = handle.id;
        let Some(epoch) = self.shared.claim(id, size_hint)? else {
            debug!(handle = %id, "download already in progress, ignoring");
            return Ok(DownloadOutcome::AlreadyRunning);
        };
        let _claim = Claim {
            shared: Arc::clone(&self.shared),
            id,
            epoch,
        };

        let target = match self.shared.stream(handle, size_hint, epoch).await {
            Ok(bytes) => SaveTarget::Assembled(bytes),
            Err(err) => {
                warn!(handle = %id, %err, "streaming failed, saving via locator");
                SaveTarget::Locator(handle.locator.clone())
            }
        };

        let action = SaveAction {
            filename: timestamped_filename(Utc::now(), handle.extension()),
            target,
        };
        let fallback = action.is_fallback();
        self.shared.deps.emitter.emit(AppEvent::save_issued(
            id,
            action.filename.clone(),
            fallback,
        ));

        match self.shared.deps.sink.save(action).await {
            Ok(saved) => {
                info!(
                    handle = %id,
                    filename = %saved.filename,
                    bytes = saved.bytes_written,
                    fallback,
                    "download saved"
                );
                self.shared.update(id, epoch, DownloadState::Complete);
                self.shared.schedule_reset(id, epoch);
                Ok(if fallback {
                    DownloadOutcome::SavedViaFallback(saved)
                } else {
                    DownloadOutcome::Saved(saved)
                })
            }
            Err(err) => {
                warn!(handle = %id, %err, "save failed");
                self.shared.update(id, epoch, DownloadState::Failed);
                self.shared.schedule_reset(id, epoch);
                Err(err)
            }
        }
    }
}

/// A claimed run. Dropping it while the entry is still `InProgress` for its
/// epoch marks the run `Failed`; after the run settles it does nothing.
struct Claim {
    shared: Arc<Shared>,
    id: HandleId,
    epoch: u64,
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.shared.abandon(self.id, self.epoch);
    }
}

impl std::fmt::Debug for DownloadTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadTracker")
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, HashMap<HandleId, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve a run for `id`.
    ///
    /// `Ok(None)` when a run is already in progress. A revoked handle goes
    /// straight to `Failed`.
    fn claim(
        self: &Arc<Self>,
        id: HandleId,
        size_hint: Option<u64>,
    ) -> Result<Option<u64>, DownloadError> {
        let mut entries = self.lock();
        if entries.get(&id).is_some_and(|entry| entry.state.is_in_progress()) {
            return Ok(None);
        }

        let epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;
        if !self.deps.liveness.is_live(id) {
            warn!(handle = %id, "download requested for a revoked handle");
            entries.insert(
                id,
                Entry {
                    state: DownloadState::Failed,
                    epoch,
                },
            );
            drop(entries);
            self.publish(id, DownloadState::Failed);
            self.schedule_reset(id, epoch);
            return Err(DownloadError::NotLive(id));
        }

        let state = DownloadState::InProgress(DownloadProgress::new(0, size_hint));
        entries.insert(id, Entry { state, epoch });
        drop(entries);
        self.publish(id, state);
        Ok(Some(epoch))
    }

    async fn stream(
        &self,
        handle: &HandleRef,
        size_hint: Option<u64>,
        epoch: u64,
    ) -> Result<Bytes, DownloadError> {
        let ArtifactStream {
            content_length,
            mut chunks,
        } = self.deps.source.open(&handle.locator).await?;

        let mut acc = ProgressAccumulator::new(content_length.or(size_hint));
        while let Some(chunk) = chunks.next().await {
            let progress = acc.push(&chunk?);
            self.advance(handle.id, epoch, progress);
        }
        if let Some(closing) = acc.closing() {
            self.advance(handle.id, epoch, closing);
        }
        Ok(acc.into_bytes())
    }

    fn advance(&self, id: HandleId, epoch: u64, progress: DownloadProgress) {
        {
            let mut entries = self.lock();
            match entries.get_mut(&id) {
                Some(entry) if entry.epoch == epoch => {
                    entry.state = DownloadState::InProgress(progress);
                }
                _ => return,
            }
        }
        self.deps
            .emitter
            .emit(AppEvent::download_progress(id, progress));
    }

    fn update(&self, id: HandleId, epoch: u64, state: DownloadState) {
        {
            let mut entries = self.lock();
            match entries.get_mut(&id) {
                Some(entry) if entry.epoch == epoch => entry.state = state,
                _ => return,
            }
        }
        self.publish(id, state);
    }

    fn publish(&self, id: HandleId, state: DownloadState) {
        debug!(handle = %id, to = state.label(), "download state transition");
        self.deps.emitter.emit(AppEvent::download_state(id, state));
    }

    /// Mark a run whose future was dropped mid-way as `Failed`.
    fn abandon(self: &Arc<Self>, id: HandleId, epoch: u64) {
        {
            let mut entries = self.lock();
            match entries.get_mut(&id) {
                Some(entry) if entry.epoch == epoch && entry.state.is_in_progress() => {
                    entry.state = DownloadState::Failed;
                }
                _ => return,
            }
        }
        warn!(handle = %id, "download run dropped before finishing");
        self.publish(id, DownloadState::Failed);
        self.schedule_reset(id, epoch);
    }

    fn schedule_reset(self: &Arc<Self>, id: HandleId, epoch: u64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            // No runtime to time the cooldown; drop the entry now
            self.reset(id, epoch);
            return;
        };
        let cooldown = self.config.cooldown;
        let shared = Arc::downgrade(self);
        runtime.spawn(async move {
            tokio::time::sleep(cooldown).await;
            // A dropped tracker has nobody left to notify
            if let Some(shared) = shared.upgrade() {
                shared.reset(id, epoch);
            }
        });
    }

    /// Drop a settled entry written by `epoch`, reverting it to `NotStarted`.
    fn reset(&self, id: HandleId, epoch: u64) {
        {
            let mut entries = self.lock();
            let current = entries.get(&id).is_some_and(|entry| {
                entry.epoch == epoch
                    && matches!(entry.state, DownloadState::Complete | DownloadState::Failed)
            });
            if !current {
                return;
            }
            entries.remove(&id);
        }
        self.publish(id, DownloadState::NotStarted);
    }
}
