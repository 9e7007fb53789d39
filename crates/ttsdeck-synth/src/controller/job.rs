//! A single issued synthesis request.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ttsdeck_core::{SpeechApiError, SynthesisRequest};

use super::{JobOutcome, Shared};

/// A request that has been accepted by the controller but not yet sent.
///
/// Dropping the job without running it leaves the controller in
/// `Requesting` until the next `begin`, `cancel` or `clear`.
#[must_use = "a synthesis job does nothing until it is run"]
pub struct SynthesisJob {
    shared: Arc<Shared>,
    generation: u64,
    token: CancellationToken,
    request: SynthesisRequest,
}

impl SynthesisJob {
    pub(super) const fn new(
        shared: Arc<Shared>,
        generation: u64,
        token: CancellationToken,
        request: SynthesisRequest,
    ) -> Self {
        Self {
            shared,
            generation,
            token,
            request,
        }
    }

    /// The token observed by this job.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Perform the network exchange and apply its result.
    pub async fn run(self) -> JobOutcome {
        let result = tokio::select! {
            biased;
            () = self.token.cancelled() => Err(SpeechApiError::Cancelled),
            result = self.shared.deps.api.synthesize(&self.request, &self.token) => result,
        };
        self.shared.settle(self.generation, &self.token, result)
    }
}

impl std::fmt::Debug for SynthesisJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisJob")
            .field("generation", &self.generation)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
