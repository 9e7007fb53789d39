//! CLI entry point.
//!
//! Parses arguments, initializes logging, builds the context through
//! [`bootstrap`] and dispatches to a handler.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ttsdeck_cli::presentation::{EventRenderer, spawn_renderer};
use ttsdeck_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let result = match command {
        Commands::Speak(args) => speak(&args).await,
        Commands::Voices { provider } => {
            handlers::voices::execute(provider.as_ref());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}

async fn speak(args: &ttsdeck_cli::SpeakArgs) -> Result<(), CliError> {
    let config = CliConfig::new(&args.connection, &args.out);
    let (ctx, events) = bootstrap(&config).map_err(|e| CliError::Config(format!("{e:#}")))?;
    let renderer = spawn_renderer(events, EventRenderer::new());

    let result = handlers::speak::execute(&ctx, args).await;

    // Dropping the context closes the event channel so the renderer drains
    drop(ctx);
    let _ = renderer.await;
    result.map(|_| ())
}
