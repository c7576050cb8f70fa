//! CLI entry point.
//!
//! # Responsibility
//! - Verify `emojimovie_core` linkage (`ping`).
//! - Run the codepoint converter and encoder from a shell.
//! - Read mappings from the configured backend without starting the server.

use clap::{Parser, Subcommand};
use emojimovie_core::db::open_db;
use emojimovie_core::{
    init_logging, load_records, AppConfig, Backend, Catalog, MappingService,
    SqliteMappingRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "emojimovie", version, about = "Emoji movie mappings from the shell")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core ping and version.
    Ping,
    /// Convert codepoint tokens (`U+1F680 U+1F315`) to characters.
    Convert {
        /// Tokens; several arguments are joined with spaces.
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Encode text as `U+XXXX` tokens.
    Encode { text: String },
    /// Print one random mapping as JSON.
    Random {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print every mapping as a JSON array.
    List {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Stdout carries command output; only warnings go to stderr.
    if let Err(err) = init_logging("warn", None) {
        eprintln!("emojimovie: {err}");
    }
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("emojimovie: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Ping => {
            println!("emojimovie_core ping={}", emojimovie_core::ping());
            println!("emojimovie_core version={}", emojimovie_core::core_version());
        }
        Command::Convert { tokens } => {
            println!("{}", emojimovie_core::convert(&tokens.join(" ")));
        }
        Command::Encode { text } => {
            println!("{}", emojimovie_core::encode(&text));
        }
        Command::Random { config } => {
            let catalog = load_catalog(config)?;
            let view = catalog
                .random(&mut rand::thread_rng())
                .ok_or("No emoji mappings available")?;
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        Command::List { config } => {
            let catalog = load_catalog(config)?;
            println!("{}", serde_json::to_string_pretty(catalog.items())?);
        }
    }
    Ok(())
}

fn load_catalog(config_path: Option<PathBuf>) -> Result<Catalog, Box<dyn Error>> {
    let config = AppConfig::load(config_path.as_deref())?;
    let catalog = match config.storage.backend {
        Backend::Sqlite => {
            let conn = open_db(&config.storage.sqlite_path)?;
            let service = MappingService::new(SqliteMappingRepository::new(&conn));
            if config.storage.seed_on_empty {
                service.seed_if_empty()?;
            }
            service.snapshot()?
        }
        Backend::Json => {
            let records = load_records(&config.storage.json_path, &config.fields)?;
            Catalog::from_records(records)
        }
    };
    Ok(catalog)
}
