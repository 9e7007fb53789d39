#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod controller;
mod handle;
mod tracker;

pub use controller::{ControllerDeps, JobOutcome, SynthesisController, SynthesisJob};
pub use handle::{ArtifactRegistry, DEFAULT_CHUNK_SIZE, HandleLiveness, ResourceHandle};
pub use tracker::{DEFAULT_COOLDOWN, DownloadConfig, DownloadDeps, DownloadOutcome, DownloadTracker};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
