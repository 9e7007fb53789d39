//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Speech API client and remote artifact source (via ttsdeck-http)
//! - Artifact registry, synthesis controller and download tracker (via ttsdeck-synth)
//! - Directory save sink and the event channel feeding the presentation layer

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use ttsdeck_core::{AppEvent, ArtifactSourcePort, ArtifactStream, ChannelEmitter, DownloadError, Locator};
use ttsdeck_http::{HttpArtifactSource, HttpClientConfig, HttpSpeechClient};
use ttsdeck_synth::{
    ArtifactRegistry, ControllerDeps, DownloadConfig, DownloadDeps, DownloadTracker,
    SynthesisController,
};

use crate::commands::ConnectionArgs;
use crate::sink::DirectorySaveSink;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// How to reach the speech backend.
    pub http: HttpClientConfig,
    /// Directory audio files are saved into.
    pub out_dir: PathBuf,
    pub download: DownloadConfig,
}

impl CliConfig {
    pub fn new(connection: &ConnectionArgs, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            http: HttpClientConfig::new()
                .with_base_url(connection.base_url.clone())
                .with_optional_api_key(connection.api_key.clone())
                .with_optional_session_cookie(connection.session_cookie.clone()),
            out_dir: out_dir.into(),
            download: DownloadConfig::default(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub controller: SynthesisController,
    pub tracker: DownloadTracker,
    pub registry: Arc<ArtifactRegistry>,
}

/// Routes locators to the source that can open them.
///
/// `blob:` locators are served by the registry, everything else over HTTP.
pub struct LocatorRouter {
    registry: Arc<ArtifactRegistry>,
    remote: Arc<dyn ArtifactSourcePort>,
}

impl LocatorRouter {
    pub fn new(registry: Arc<ArtifactRegistry>, remote: Arc<dyn ArtifactSourcePort>) -> Self {
        Self { registry, remote }
    }
}

#[async_trait]
impl ArtifactSourcePort for LocatorRouter {
    async fn open(&self, locator: &Locator) -> Result<ArtifactStream, DownloadError> {
        if locator.is_blob() {
            self.registry.open(locator).await
        } else {
            self.remote.open(locator).await
        }
    }
}

/// Wire up the CLI context and the receiver of its events.
pub fn bootstrap(config: &CliConfig) -> Result<(CliContext, UnboundedReceiver<AppEvent>)> {
    let (emitter, events) = ChannelEmitter::new();
    let emitter = Arc::new(emitter);
    let registry = Arc::new(ArtifactRegistry::new());

    let api = Arc::new(HttpSpeechClient::new(&config.http)?);
    let remote: Arc<dyn ArtifactSourcePort> = Arc::new(HttpArtifactSource::new(&config.http)?);

    let controller = SynthesisController::new(ControllerDeps {
        api,
        registry: Arc::clone(&registry),
        emitter: emitter.clone(),
    });

    let tracker = DownloadTracker::new(
        DownloadDeps {
            source: Arc::new(LocatorRouter::new(Arc::clone(&registry), Arc::clone(&remote))),
            sink: Arc::new(DirectorySaveSink::new(
                config.out_dir.clone(),
                Arc::clone(&registry),
                remote,
            )),
            liveness: registry.clone(),
            emitter,
        },
        config.download,
    );

    Ok((
        CliContext {
            controller,
            tracker,
            registry,
        },
        events,
    ))
}
