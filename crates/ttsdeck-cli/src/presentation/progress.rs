//! Terminal progress bar for downloads.

use indicatif::{ProgressBar, ProgressStyle};

use ttsdeck_core::DownloadProgress;

/// A download bar, or a spinner when the total is unknown.
pub struct DownloadBar {
    bar: ProgressBar,
}

impl DownloadBar {
    /// Create a download-style progress bar.
    fn create_download_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Create a spinner for indeterminate progress.
    fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    }

    pub fn start(total: Option<u64>) -> Self {
        let bar = match total {
            Some(t) if t > 0 => Self::create_download_bar(t),
            _ => Self::create_spinner(),
        };
        bar.set_message("downloading");
        Self { bar }
    }

    /// A bar that draws nothing, for tests and non-interactive output.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn update(&self, progress: &DownloadProgress) {
        if let Some(total) = progress.total {
            self.bar.set_length(total.max(progress.received));
        }
        self.bar.set_position(progress.received);
    }

    pub fn println(&self, msg: &str) {
        self.bar.println(msg);
    }

    pub fn finish(self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn abandon(self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
