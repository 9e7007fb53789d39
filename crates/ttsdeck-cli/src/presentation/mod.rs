//! Rendering of application events on the terminal.
//!
//! Notices go to stderr; download progress drives an indicatif bar.

mod progress;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::debug;

use ttsdeck_core::{AppEvent, DownloadState, NoticeLevel, StatusNotice};

pub use progress::DownloadBar;

/// Line printed for a status notice.
#[must_use]
pub fn format_notice(notice: &StatusNotice) -> String {
    let marker = match notice.level {
        NoticeLevel::Loading => "…",
        NoticeLevel::Success => "✓",
        NoticeLevel::Neutral => "-",
        NoticeLevel::Error => "✗",
    };
    format!("{marker} {}", notice.message)
}

/// Turns events into terminal output.
pub struct EventRenderer {
    bar: Option<DownloadBar>,
    interactive: bool,
}

impl EventRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bar: None,
            interactive: true,
        }
    }

    /// Renderer that never draws progress bars.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            bar: None,
            interactive: false,
        }
    }

    fn print(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Notice { notice } => self.print(&format_notice(notice)),
            AppEvent::SynthesisStateChanged { state } => {
                debug!(state = state.label(), "synthesis state");
            }
            AppEvent::DownloadStateChanged { state, .. } => match state {
                DownloadState::InProgress(progress) => {
                    self.bar = Some(if self.interactive {
                        DownloadBar::start(progress.total)
                    } else {
                        DownloadBar::hidden()
                    });
                }
                DownloadState::Complete => {
                    if let Some(bar) = self.bar.take() {
                        bar.finish("saved");
                    }
                }
                DownloadState::Failed => {
                    if let Some(bar) = self.bar.take() {
                        bar.abandon("failed");
                    }
                }
                DownloadState::NotStarted => {}
            },
            AppEvent::DownloadProgress { progress, .. } => {
                if let Some(bar) = &self.bar {
                    bar.update(progress);
                }
            }
            AppEvent::SaveIssued {
                filename, fallback, ..
            } => {
                if *fallback {
                    self.print(&format!("- streaming failed, saving {filename} directly"));
                } else {
                    debug!(%filename, "save issued");
                }
            }
        }
    }

    /// Whether a download bar is currently shown.
    #[must_use]
    pub const fn has_bar(&self) -> bool {
        self.bar.is_some()
    }
}

impl Default for EventRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render every event from `events` until all senders are gone.
pub fn spawn_renderer(
    mut events: UnboundedReceiver<AppEvent>,
    mut renderer: EventRenderer,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            renderer.handle(&event);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttsdeck_core::{DownloadProgress, HandleId, Provider};

    #[test]
    fn test_notice_lines() {
        assert_eq!(
            format_notice(&StatusNotice::requesting(&Provider::OpenAi)),
            "… Requesting OpenAI to generate speech..."
        );
        assert_eq!(
            format_notice(&StatusNotice::ready()),
            "✓ Speech generated successfully!"
        );
        assert_eq!(
            format_notice(&StatusNotice::error("Unsupported service")),
            "✗ Error: Unsupported service"
        );
    }

    #[test]
    fn test_bar_lifecycle() {
        let id = HandleId::new();
        let mut renderer = EventRenderer::quiet();

        renderer.handle(&AppEvent::download_state(
            id,
            DownloadState::InProgress(DownloadProgress::new(0, Some(10))),
        ));
        assert!(renderer.has_bar());

        renderer.handle(&AppEvent::download_progress(
            id,
            DownloadProgress::new(10, Some(10)),
        ));
        renderer.handle(&AppEvent::download_state(id, DownloadState::Complete));
        assert!(!renderer.has_bar());
    }

    #[tokio::test]
    async fn test_renderer_stops_when_senders_drop() {
        let (emitter, events) = ttsdeck_core::ChannelEmitter::new();
        let task = spawn_renderer(events, EventRenderer::quiet());
        ttsdeck_core::AppEventEmitter::emit(&emitter, AppEvent::notice(StatusNotice::ready()));
        drop(emitter);
        task.await.unwrap();
    }
}
