//! Integration tests for the `SynthesisController` state machine.
//!
//! The speech API is a scripted fake whose replies are released by each
//! test, so the interleaving of overlapping requests is deterministic.
//!
//! # What is tested
//!
//! - A successful request binds exactly one live artifact
//! - Validation failures never reach the network
//! - Cancellation is a distinct terminal state with a neutral notice
//! - A newer request supersedes an in-flight one; the stale result is dropped
//! - Server and transport failures are classified
//! - Handles are revoked on replacement, `clear` and controller drop

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::mpsc::UnboundedReceiver;

use common::{ScriptedApi, audio, drain_events};
use ttsdeck_core::{
    AppEvent, Artifact, CancellationToken, ChannelEmitter, FailureKind, NoticeLevel, Provider,
    SpeechApiError, SpeechApiPort, StatusNotice, SynthesisError, SynthesisRequest, SynthesisState,
    ValidationError,
};
use ttsdeck_synth::{ArtifactRegistry, ControllerDeps, JobOutcome, SynthesisController};

mock! {
    Api {}

    #[async_trait]
    impl SpeechApiPort for Api {
        async fn synthesize(
            &self,
            request: &SynthesisRequest,
            cancel: &CancellationToken,
        ) -> Result<Artifact, SpeechApiError>;
    }
}

// ── Helpers ────────────────────────────────────────────────────────

struct Harness {
    controller: SynthesisController,
    registry: Arc<ArtifactRegistry>,
    events: UnboundedReceiver<AppEvent>,
}

fn harness(api: Arc<dyn SpeechApiPort>) -> Harness {
    let registry = Arc::new(ArtifactRegistry::new());
    let (emitter, events) = ChannelEmitter::new();
    let controller = SynthesisController::new(ControllerDeps {
        api,
        registry: Arc::clone(&registry),
        emitter: Arc::new(emitter),
    });
    Harness {
        controller,
        registry,
        events,
    }
}

fn hello() -> SynthesisRequest {
    SynthesisRequest::new("Hello", Provider::OpenAi, "alloy")
}

fn states(events: &[AppEvent]) -> Vec<SynthesisState> {
    events
        .iter()
        .filter_map(|e| match e {
            AppEvent::SynthesisStateChanged { state } => Some(state.clone()),
            _ => None,
        })
        .collect()
}

fn notices(events: &[AppEvent]) -> Vec<StatusNotice> {
    events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Notice { notice } => Some(notice.clone()),
            _ => None,
        })
        .collect()
}

async fn wait_for_calls(api: &ScriptedApi, n: usize) {
    while api.calls() < n {
        tokio::task::yield_now().await;
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_request_binds_one_artifact() {
    let api = ScriptedApi::new();
    api.reply(Ok(audio(512)));
    let mut h = harness(api.clone());

    let outcome = tokio_test::assert_ok!(h.controller.start(hello()).await);

    let JobOutcome::Ready(view) = outcome else {
        panic!("expected Ready");
    };
    assert_eq!(view.size, 512);
    assert_eq!(h.controller.state(), SynthesisState::Ready { handle: view.clone() });
    assert_eq!(h.controller.current_handle(), Some(view.clone()));
    assert_eq!(h.registry.live_count(), 1);
    assert!(h.registry.is_live(view.id));
    assert_eq!(h.registry.resolve(&view.locator).map(|a| a.len()), Some(512));
    assert_eq!(api.calls(), 1);

    let events = drain_events(&mut h.events);
    assert_eq!(
        states(&events),
        vec![SynthesisState::Requesting, SynthesisState::Ready { handle: view }]
    );
    let notices = notices(&events);
    assert_eq!(notices[0].message, "Requesting OpenAI to generate speech...");
    assert_eq!(notices[0].level, NoticeLevel::Loading);
    assert_eq!(notices[1], StatusNotice::ready());
}

#[tokio::test]
async fn empty_text_never_reaches_network() {
    let mut api = MockApi::new();
    api.expect_synthesize().times(0);
    let mut h = harness(Arc::new(api));

    let request = SynthesisRequest::new("   \n", Provider::OpenAi, "alloy");
    let err = tokio_test::assert_err!(h.controller.start(request).await);

    assert_eq!(err, SynthesisError::Validation(ValidationError::EmptyText));
    assert_eq!(h.controller.state(), SynthesisState::Idle);

    let events = drain_events(&mut h.events);
    assert!(states(&events).is_empty());
    assert_eq!(
        notices(&events),
        vec![StatusNotice::invalid("Please enter text to convert.")]
    );
}

#[tokio::test]
async fn validation_failure_keeps_previous_handle() {
    let api = ScriptedApi::new();
    api.reply(Ok(audio(64)));
    let h = harness(api.clone());
    h.controller.start(hello()).await.unwrap();
    let before = h.controller.state();

    let request = SynthesisRequest::new("", Provider::Gemini, "Zephyr");
    assert!(h.controller.start(request).await.is_err());

    assert_eq!(h.controller.state(), before);
    assert_eq!(h.registry.live_count(), 1);
    assert_eq!(api.calls(), 1);
}

#[tokio::test]
async fn cancel_ends_in_cancelled_not_failed() {
    let api = ScriptedApi::new();
    let _pending = api.expect();
    let mut h = harness(api.clone());

    let job = h.controller.begin(hello()).unwrap();
    let running = tokio::spawn(job.run());
    wait_for_calls(&api, 1).await;

    assert!(h.controller.cancel());
    assert_eq!(running.await.unwrap(), JobOutcome::Cancelled);
    assert_eq!(h.controller.state(), SynthesisState::Cancelled);
    assert_eq!(h.registry.live_count(), 0);

    let events = drain_events(&mut h.events);
    assert_eq!(
        states(&events),
        vec![SynthesisState::Requesting, SynthesisState::Cancelled]
    );
    let last = notices(&events).pop().unwrap();
    assert_eq!(last.level, NoticeLevel::Neutral);
    assert_eq!(last.message, "Speech generation cancelled");
    assert_eq!(last.clear_after, Some(Duration::from_secs(3)));
}

#[tokio::test]
async fn cancel_outside_requesting_is_ignored() {
    let api = ScriptedApi::new();
    let h = harness(api.clone());
    assert!(!h.controller.cancel());

    api.reply(Ok(audio(16)));
    h.controller.start(hello()).await.unwrap();
    assert!(!h.controller.cancel());
    assert!(matches!(h.controller.state(), SynthesisState::Ready { .. }));
}

#[tokio::test]
async fn cancel_before_run_skips_network() {
    let api = ScriptedApi::new();
    let h = harness(api.clone());

    let job = h.controller.begin(hello()).unwrap();
    assert!(h.controller.cancel());
    assert_eq!(job.run().await, JobOutcome::Cancelled);
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn adapter_reported_cancellation_is_cancelled() {
    let api = ScriptedApi::new();
    api.reply(Err(SpeechApiError::Cancelled));
    let h = harness(api);

    let outcome = h.controller.start(hello()).await.unwrap();
    assert_eq!(outcome, JobOutcome::Cancelled);
    assert_eq!(h.controller.state(), SynthesisState::Cancelled);
}

#[tokio::test]
async fn newer_request_supersedes_in_flight_one() {
    let api = ScriptedApi::new();
    let first_reply = api.expect();
    let second_reply = api.expect();
    let mut h = harness(api.clone());

    let first = h.controller.begin(hello()).unwrap();
    let first_token = first.token().clone();
    let first_run = tokio::spawn(first.run());
    wait_for_calls(&api, 1).await;

    let second = h
        .controller
        .begin(SynthesisRequest::new("Hello again", Provider::OpenAi, "nova"))
        .unwrap();
    assert!(first_token.is_cancelled());

    second_reply.send(Ok(audio(256))).unwrap();
    let JobOutcome::Ready(view) = second.run().await else {
        panic!("second request should be ready");
    };

    // The first response shows up late; it must not be applied.
    let _ = first_reply.send(Ok(audio(128)));
    assert_eq!(first_run.await.unwrap(), JobOutcome::Superseded);

    assert_eq!(
        h.controller.state(),
        SynthesisState::Ready {
            handle: view.clone()
        }
    );
    assert_eq!(h.registry.live_count(), 1);
    assert_eq!(view.size, 256);

    let events = drain_events(&mut h.events);
    assert_eq!(
        states(&events),
        vec![
            SynthesisState::Requesting,
            SynthesisState::Requesting,
            SynthesisState::Ready { handle: view },
        ]
    );
    assert!(
        notices(&events)
            .iter()
            .all(|n| n.level != NoticeLevel::Neutral)
    );
}

#[tokio::test]
async fn clear_discards_in_flight_result() {
    let api = ScriptedApi::new();
    let reply = api.expect();
    let h = harness(api.clone());

    let running = tokio::spawn(h.controller.begin(hello()).unwrap().run());
    wait_for_calls(&api, 1).await;

    h.controller.clear();
    let _ = reply.send(Ok(audio(32)));

    assert_eq!(running.await.unwrap(), JobOutcome::Superseded);
    assert_eq!(h.controller.state(), SynthesisState::Idle);
    assert_eq!(h.registry.live_count(), 0);
}

#[tokio::test]
async fn server_error_message_passes_through() {
    let api = ScriptedApi::new();
    api.reply(Err(SpeechApiError::Status {
        status: 401,
        message: "Authentication error: Invalid Gemini API key.".into(),
    }));
    let mut h = harness(api);

    let request = SynthesisRequest::new("Hi", Provider::Gemini, "Kore");
    let outcome = h.controller.start(request).await.unwrap();

    assert!(matches!(
        outcome,
        JobOutcome::Failed(SynthesisError::Server { status: 401, .. })
    ));
    assert_eq!(
        h.controller.state(),
        SynthesisState::Failed {
            kind: FailureKind::ServerError,
            message: "Authentication error: Invalid Gemini API key.".into(),
        }
    );

    let last = notices(&drain_events(&mut h.events)).pop().unwrap();
    assert_eq!(
        last.message,
        "Error: Authentication error: Invalid Gemini API key."
    );
    assert_eq!(last.level, NoticeLevel::Error);
    assert!(last.clear_after.is_none());
}

#[tokio::test]
async fn transport_error_is_classified() {
    let api = ScriptedApi::new();
    api.reply(Err(SpeechApiError::Transport("connection refused".into())));
    let h = harness(api);

    h.controller.start(hello()).await.unwrap();

    let SynthesisState::Failed { kind, message } = h.controller.state() else {
        panic!("expected Failed");
    };
    assert_eq!(kind, FailureKind::TransportError);
    assert!(message.contains("connection refused"));
    assert_eq!(h.registry.live_count(), 0);
}

#[tokio::test]
async fn new_request_revokes_previous_handle_first() {
    let api = ScriptedApi::new();
    api.reply(Ok(audio(100)));
    let h = harness(api.clone());

    let JobOutcome::Ready(first) = h.controller.start(hello()).await.unwrap() else {
        panic!("first request should be ready");
    };

    let reply = api.expect();
    let job = h.controller.begin(hello()).unwrap();
    assert!(!h.registry.is_live(first.id));
    assert_eq!(h.registry.live_count(), 0);
    assert!(h.controller.current_handle().is_none());

    reply.send(Ok(audio(200))).unwrap();
    let JobOutcome::Ready(second) = job.run().await else {
        panic!("second request should be ready");
    };
    assert_ne!(first.id, second.id);
    assert_eq!(h.registry.live_count(), 1);
}

#[tokio::test]
async fn clear_revokes_and_returns_to_idle() {
    let api = ScriptedApi::new();
    api.reply(Ok(audio(10)));
    let h = harness(api);
    h.controller.start(hello()).await.unwrap();

    h.controller.clear();
    h.controller.clear();

    assert_eq!(h.controller.state(), SynthesisState::Idle);
    assert_eq!(h.registry.live_count(), 0);
}

#[tokio::test]
async fn dropping_controller_revokes_handle() {
    let api = ScriptedApi::new();
    api.reply(Ok(audio(10)));
    let Harness {
        controller,
        registry,
        events: _events,
    } = harness(api);
    controller.start(hello()).await.unwrap();
    assert_eq!(registry.live_count(), 1);

    drop(controller);

    assert_eq!(registry.live_count(), 0);
}

#[tokio::test]
async fn subscribers_see_latest_state() {
    let api = ScriptedApi::new();
    let reply = api.expect();
    let h = harness(api);
    let mut rx = h.controller.subscribe();
    assert_eq!(*rx.borrow_and_update(), SynthesisState::Idle);

    let job = h.controller.begin(hello()).unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_requesting());

    reply.send(Ok(audio(8))).unwrap();
    job.run().await;
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().label(), "ready");
}
