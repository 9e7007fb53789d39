//! Main commands enum and argument groups.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use ttsdeck_core::Provider;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert text to speech and save the audio
    Speak(SpeakArgs),

    /// List the voices of a provider (all providers when omitted)
    Voices {
        /// Provider name (e.g. "openai", "gemini")
        provider: Option<Provider>,
    },
}

/// Arguments of `speak`.
#[derive(Args, Debug)]
pub struct SpeakArgs {
    /// Text to convert
    #[arg(short, long)]
    pub text: String,

    /// Speech provider
    #[arg(short, long, env = "TTSDECK_PROVIDER", default_value = "openai")]
    pub provider: Provider,

    /// Voice id; defaults to the provider's first voice
    #[arg(long)]
    pub voice: Option<String>,

    /// Directory the audio file is saved into
    #[arg(short, long, env = "TTSDECK_OUT_DIR", default_value = ".")]
    pub out: PathBuf,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// How to reach the speech backend.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the speech backend
    #[arg(long, env = "TTSDECK_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Bearer token for the backend
    #[arg(long, env = "TTSDECK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Raw session cookie (e.g. "session=...")
    #[arg(long, env = "TTSDECK_SESSION_COOKIE", hide_env_values = true)]
    pub session_cookie: Option<String>,
}
