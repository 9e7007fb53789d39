//! Chunk accumulation and progress computation for a single run.

use bytes::{Bytes, BytesMut};

use ttsdeck_core::DownloadProgress;

/// Upper bound on the buffer reserved up front from a declared length.
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// Collects stream chunks and derives the progress value after each one.
///
/// Values are non-decreasing: `received` only grows and the percentage is
/// capped at 100.
#[derive(Debug)]
pub(super) struct ProgressAccumulator {
    total: Option<u64>,
    received: u64,
    buffer: BytesMut,
    last: Option<DownloadProgress>,
}

impl ProgressAccumulator {
    pub(super) fn new(total: Option<u64>) -> Self {
        let capacity = total
            .and_then(|t| usize::try_from(t).ok())
            .map_or(0, |t| t.min(MAX_PREALLOCATION));
        Self {
            total,
            received: 0,
            buffer: BytesMut::with_capacity(capacity),
            last: None,
        }
    }

    pub(super) fn push(&mut self, chunk: &[u8]) -> DownloadProgress {
        self.buffer.extend_from_slice(chunk);
        self.received += chunk.len() as u64;
        let progress = DownloadProgress::new(self.received, self.total);
        self.last = Some(progress);
        progress
    }

    /// The closing 100% value, if the last emitted value fell short of it.
    pub(super) fn closing(&self) -> Option<DownloadProgress> {
        match self.last {
            Some(last) if last.is_full() => None,
            _ => Some(DownloadProgress::finished(self.received)),
        }
    }

    pub(super) fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }
}
