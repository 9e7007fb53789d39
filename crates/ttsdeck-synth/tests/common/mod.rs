//! Fakes shared by the ttsdeck-synth integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::{mpsc, oneshot};

use ttsdeck_core::{
    AppEvent, Artifact, ArtifactSourcePort, ArtifactStream, CancellationToken, DownloadError,
    HandleId, Locator, SaveAction, SaveSinkPort, SaveTarget, SavedArtifact, SpeechApiError,
    SpeechApiPort, SynthesisRequest,
};
use ttsdeck_synth::HandleLiveness;

pub type Reply = Result<Artifact, SpeechApiError>;

// ── Speech API ─────────────────────────────────────────────────────

/// Speech API whose replies are released by the test, one per request.
#[derive(Default)]
pub struct ScriptedApi {
    replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply slot for the next request; send on the returned
    /// sender to let that request finish.
    pub fn expect(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(rx);
        tx
    }

    /// Queue a reply that is available immediately.
    pub fn reply(&self, reply: Reply) {
        self.expect().send(reply).unwrap();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechApiPort for ScriptedApi {
    async fn synthesize(
        &self,
        _request: &SynthesisRequest,
        _cancel: &CancellationToken,
    ) -> Result<Artifact, SpeechApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(SpeechApiError::Transport("reply dropped".into()))),
            None => Err(SpeechApiError::Transport("unexpected request".into())),
        }
    }
}

// ── Artifact source ────────────────────────────────────────────────

/// Source that serves a fixed list of chunks.
pub struct ChunkSource {
    content_length: Option<u64>,
    chunks: Vec<Result<Bytes, DownloadError>>,
    fail_open: bool,
    opens: AtomicUsize,
}

impl ChunkSource {
    pub fn new(content_length: Option<u64>, sizes: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            content_length,
            chunks: sizes.iter().map(|n| Ok(Bytes::from(vec![0xAB; *n]))).collect(),
            fail_open: false,
            opens: AtomicUsize::new(0),
        })
    }

    /// Source that yields `sizes` and then a read error.
    pub fn broken_after(content_length: Option<u64>, sizes: &[usize]) -> Arc<Self> {
        let mut chunks: Vec<_> = sizes.iter().map(|n| Ok(Bytes::from(vec![0xAB; *n]))).collect();
        chunks.push(Err(DownloadError::read("connection reset")));
        Arc::new(Self {
            content_length,
            chunks,
            fail_open: false,
            opens: AtomicUsize::new(0),
        })
    }

    /// Source whose `open` always fails.
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            content_length: None,
            chunks: Vec::new(),
            fail_open: true,
            opens: AtomicUsize::new(0),
        })
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactSourcePort for ChunkSource {
    async fn open(&self, _locator: &Locator) -> Result<ArtifactStream, DownloadError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(DownloadError::acquire("locator does not resolve"));
        }
        Ok(ArtifactStream {
            content_length: self.content_length,
            chunks: stream::iter(self.chunks.clone()).boxed(),
        })
    }
}

/// Source whose chunks are fed by the test through a channel.
pub struct FedSource {
    content_length: Option<u64>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<Bytes>>>,
}

impl FedSource {
    pub fn new(content_length: Option<u64>) -> (Arc<Self>, mpsc::UnboundedSender<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Arc::new(Self {
            content_length,
            rx: Mutex::new(Some(rx)),
        });
        (source, tx)
    }
}

#[async_trait]
impl ArtifactSourcePort for FedSource {
    async fn open(&self, _locator: &Locator) -> Result<ArtifactStream, DownloadError> {
        let rx = self
            .rx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| DownloadError::acquire("already opened"))?;
        let chunks = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (Ok(chunk), rx))
        });
        Ok(ArtifactStream {
            content_length: self.content_length,
            chunks: chunks.boxed(),
        })
    }
}

// ── Save sink ──────────────────────────────────────────────────────

/// Sink that records every action it receives.
#[derive(Default)]
pub struct MemorySink {
    actions: Mutex<Vec<SaveAction>>,
    fail: bool,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            actions: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn actions(&self) -> Vec<SaveAction> {
        self.actions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveSinkPort for MemorySink {
    async fn save(&self, action: SaveAction) -> Result<SavedArtifact, DownloadError> {
        if self.fail {
            return Err(DownloadError::save("disk full"));
        }
        let bytes_written = match &action.target {
            SaveTarget::Assembled(bytes) => bytes.len() as u64,
            SaveTarget::Locator(_) => 0,
        };
        let saved = SavedArtifact {
            filename: action.filename.clone(),
            path: None,
            bytes_written,
        };
        self.actions.lock().unwrap().push(action);
        Ok(saved)
    }
}

// ── Liveness ───────────────────────────────────────────────────────

/// Liveness answer fixed at construction.
pub struct FixedLiveness(pub bool);

impl HandleLiveness for FixedLiveness {
    fn is_live(&self, _id: HandleId) -> bool {
        self.0
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Drain all pending events from the event receiver and return them.
pub fn drain_events(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    events
}

pub fn audio(len: usize) -> Artifact {
    Artifact::new(vec![0u8; len]).with_content_type("audio/mpeg")
}
