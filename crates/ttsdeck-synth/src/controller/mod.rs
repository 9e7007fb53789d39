//! Synthesis request controller.
//!
//! Owns the single [`SynthesisState`] and the single live [`ResourceHandle`].
//! Each request gets a fresh [`CancellationToken`] and a generation number;
//! starting a new request signals the previous token and bumps the
//! generation, so a stale response can never overwrite a newer state.
//!
//! # Design Principles
//!
//! - `begin` does all synchronous work (validation, revocation, token swap,
//!   `Requesting` transition) before any network call is issued
//! - The network await lives in [`SynthesisJob::run`] and is raced against
//!   the token with a biased `tokio::select!`
//! - Results are applied under the controller lock after a generation check
//! - State is published on a `watch` channel and mirrored as [`AppEvent`]s

mod job;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ttsdeck_core::{
    AppEvent, AppEventEmitter, Artifact, FailureKind, HandleRef, SpeechApiError, SpeechApiPort,
    StatusNotice, SynthesisError, SynthesisRequest, SynthesisState,
};

use crate::handle::{ArtifactRegistry, ResourceHandle};

pub use job::SynthesisJob;

/// Collaborators of the controller.
#[derive(Clone)]
pub struct ControllerDeps {
    pub api: Arc<dyn SpeechApiPort>,
    /// Registry the controller binds successful artifacts into.
    pub registry: Arc<ArtifactRegistry>,
    pub emitter: Arc<dyn AppEventEmitter>,
}

/// How a single job ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// The artifact is bound to a new live handle.
    Ready(HandleRef),
    /// The job's token was signalled.
    Cancelled,
    /// The request failed; the state is now `Failed`.
    Failed(SynthesisError),
    /// A newer request (or `clear`) replaced this one. Nothing was applied.
    Superseded,
}

/// Drives synthesis requests and owns the resulting handle.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct SynthesisController {
    shared: Arc<Shared>,
}

struct Inner {
    generation: u64,
    token: Option<CancellationToken>,
    current: Option<ResourceHandle>,
}

struct Shared {
    deps: ControllerDeps,
    state_tx: watch::Sender<SynthesisState>,
    inner: Mutex<Inner>,
}

impl SynthesisController {
    #[must_use]
    pub fn new(deps: ControllerDeps) -> Self {
        let (state_tx, _) = watch::channel(SynthesisState::Idle);
        Self {
            shared: Arc::new(Shared {
                deps,
                state_tx,
                inner: Mutex::new(Inner {
                    generation: 0,
                    token: None,
                    current: None,
                }),
            }),
        }
    }

    /// Prepare a request without awaiting the network.
    ///
    /// On success the state is `Requesting`, any previous handle is revoked
    /// and any in-flight request has been signalled. Await the returned job
    /// to perform the exchange.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::Validation`] if the request is invalid. No
    /// state change happens in that case; only a notice is emitted.
    pub fn begin(&self, request: SynthesisRequest) -> Result<SynthesisJob, SynthesisError> {
        if let Err(err) = request.validate() {
            debug!(%err, "rejecting synthesis request");
            self.shared.notify(StatusNotice::invalid(err.to_string()));
            return Err(err.into());
        }

        let mut inner = self.shared.lock();
        if let Some(mut handle) = inner.current.take() {
            handle.revoke();
        }
        if let Some(previous) = inner.token.take() {
            debug!(generation = inner.generation, "superseding in-flight request");
            previous.cancel();
        }

        inner.generation += 1;
        let generation = inner.generation;
        let token = CancellationToken::new();
        inner.token = Some(token.clone());

        self.shared.transition(SynthesisState::Requesting);
        self.shared.notify(StatusNotice::requesting(request.provider()));
        drop(inner);

        Ok(SynthesisJob::new(
            Arc::clone(&self.shared),
            generation,
            token,
            request,
        ))
    }

    /// Submit a request and wait for it to settle.
    ///
    /// # Errors
    ///
    /// Only validation failures are returned as `Err`; every other ending is
    /// a [`JobOutcome`].
    pub async fn start(&self, request: SynthesisRequest) -> Result<JobOutcome, SynthesisError> {
        let job = self.begin(request)?;
        Ok(job.run().await)
    }

    /// Signal the in-flight request, if any.
    ///
    /// Returns `false` (and does nothing) unless the state is `Requesting`.
    pub fn cancel(&self) -> bool {
        let inner = self.shared.lock();
        if !self.shared.state_tx.borrow().is_requesting() {
            return false;
        }
        inner.token.as_ref().is_some_and(|token| {
            info!("cancelling speech generation");
            token.cancel();
            true
        })
    }

    /// Revoke the current handle and return to `Idle`.
    ///
    /// An in-flight request is signalled and its result discarded.
    pub fn clear(&self) {
        let mut inner = self.shared.lock();
        if let Some(token) = inner.token.take() {
            token.cancel();
        }
        inner.generation += 1;
        if let Some(mut handle) = inner.current.take() {
            handle.revoke();
        }
        self.shared.transition(SynthesisState::Idle);
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SynthesisState {
        self.shared.state_tx.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SynthesisState> {
        self.shared.state_tx.subscribe()
    }

    /// View of the live handle, if one exists.
    #[must_use]
    pub fn current_handle(&self) -> Option<HandleRef> {
        self.shared
            .lock()
            .current
            .as_ref()
            .map(ResourceHandle::handle_ref)
    }
}

impl std::fmt::Debug for SynthesisController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisController")
            .field("state", &*self.shared.state_tx.borrow())
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: SynthesisState) {
        debug!(to = next.label(), "synthesis state transition");
        self.state_tx.send_replace(next.clone());
        self.deps.emitter.emit(AppEvent::synthesis_state(next));
    }

    fn notify(&self, notice: StatusNotice) {
        self.deps.emitter.emit(AppEvent::notice(notice));
    }

    /// Apply the result of the job issued as `generation`.
    fn settle(
        &self,
        generation: u64,
        token: &CancellationToken,
        result: Result<Artifact, SpeechApiError>,
    ) -> JobOutcome {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "discarding superseded synthesis result"
            );
            return JobOutcome::Superseded;
        }
        inner.token = None;

        if token.is_cancelled() || matches!(result, Err(SpeechApiError::Cancelled)) {
            info!("speech generation cancelled");
            self.transition(SynthesisState::Cancelled);
            self.notify(StatusNotice::cancelled());
            return JobOutcome::Cancelled;
        }

        match result {
            Ok(artifact) => {
                if let Some(mut previous) = inner.current.take() {
                    previous.revoke();
                }
                let handle = self.deps.registry.create(artifact);
                let view = handle.handle_ref();
                inner.current = Some(handle);
                info!(handle = %view.id, size = view.size, "speech generated");
                self.transition(SynthesisState::Ready {
                    handle: view.clone(),
                });
                self.notify(StatusNotice::ready());
                JobOutcome::Ready(view)
            }
            Err(err) => {
                let err = SynthesisError::from(err);
                let kind = err.failure_kind().unwrap_or(FailureKind::TransportError);
                warn!(?kind, %err, "speech generation failed");
                self.transition(SynthesisState::Failed {
                    kind,
                    message: err.to_string(),
                });
                self.notify(StatusNotice::error(&err));
                JobOutcome::Failed(err)
            }
        }
    }
}
