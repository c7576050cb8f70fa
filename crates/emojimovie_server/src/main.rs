//! Server entry point.

use clap::Parser;
use emojimovie_core::{default_log_level, init_logging, AppConfig};
use emojimovie_server::{serve, AppState, StartupError};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "emojimovie-server", version, about = "Random emoji/movie pairs over HTTP")]
struct Args {
    /// TOML config file; defaults plus `EMOJIMOVIE_*` env vars when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve a seeded in-memory database, ignoring storage settings.
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=server status=error error={}", err);
            eprintln!("emojimovie-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), StartupError> {
    let config = AppConfig::load(args.config.as_deref())?;

    let level = config
        .logging
        .level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, config.logging.dir.as_deref()).map_err(StartupError::Logging)?;

    let state = if args.demo {
        AppState::seeded_in_memory()?
    } else {
        AppState::from_config(&config)?
    };
    serve(&config, state).await
}
