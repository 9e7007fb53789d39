#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod sink;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, LocatorRouter, bootstrap};
pub use commands::{Commands, ConnectionArgs, SpeakArgs};
pub use error::CliError;
pub use parser::Cli;
pub use sink::DirectorySaveSink;
