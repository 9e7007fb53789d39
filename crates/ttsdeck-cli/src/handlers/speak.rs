//! Speak command handler.
//!
//! Submits one synthesis request, waits for it (Ctrl-C cancels) and saves
//! the resulting clip through the download tracker.

use std::future::Future;

use tracing::debug;

use ttsdeck_core::{SavedArtifact, SynthesisRequest};
use ttsdeck_synth::{DownloadOutcome, JobOutcome};

use crate::bootstrap::CliContext;
use crate::commands::SpeakArgs;
use crate::error::CliError;

/// Build the request for `args`, filling in the provider's default voice.
#[must_use]
pub fn build_request(args: &SpeakArgs) -> SynthesisRequest {
    let voice = args
        .voice
        .clone()
        .or_else(|| args.provider.default_voice().map(str::to_string))
        .unwrap_or_default();
    SynthesisRequest::new(args.text.clone(), args.provider.clone(), voice)
}

/// Execute the speak command.
///
/// # Errors
///
/// Returns an error if the request is invalid, fails, is cancelled with
/// Ctrl-C, or the audio cannot be written.
pub async fn execute(ctx: &CliContext, args: &SpeakArgs) -> Result<SavedArtifact, CliError> {
    let request = build_request(args);
    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler; never interrupt.
            std::future::pending::<()>().await;
        }
    };
    let saved = speak(ctx, request, interrupt).await?;

    if let Some(path) = &saved.path {
        println!("{}", path.display());
    }
    Ok(saved)
}

/// Run one request to completion and save the clip.
///
/// When `interrupt` resolves first the request is cancelled.
///
/// # Errors
///
/// See [`execute`].
pub async fn speak(
    ctx: &CliContext,
    request: SynthesisRequest,
    interrupt: impl Future<Output = ()>,
) -> Result<SavedArtifact, CliError> {
    let job = ctx.controller.begin(request)?;
    let run = job.run();
    tokio::pin!(run, interrupt);

    let outcome = tokio::select! {
        outcome = &mut run => outcome,
        () = &mut interrupt => {
            debug!("interrupt received");
            ctx.controller.cancel();
            run.await
        }
    };

    let handle = match outcome {
        JobOutcome::Ready(handle) => handle,
        JobOutcome::Cancelled | JobOutcome::Superseded => return Err(CliError::Cancelled),
        JobOutcome::Failed(err) => return Err(err.into()),
    };

    match ctx.tracker.run(&handle, Some(handle.size)).await? {
        DownloadOutcome::Saved(saved) | DownloadOutcome::SavedViaFallback(saved) => Ok(saved),
        DownloadOutcome::AlreadyRunning => Err(CliError::Io(format!(
            "a save of {} is already running",
            handle.locator
        ))),
    }
}
