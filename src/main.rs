// ============================================================
// File: main.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 15, 2026
//
// Description:
//   Entry point for the Witter index store REPL.
//   Loads the optional TOML config named by `--config`, installs
//   the tracing subscriber, then hands a fresh Session to the
//   command loop in lib.rs.
//
//   Responses go to standard output; log lines go to standard
//   error so scripted runs can diff stdout directly.
//
// Notes:
//   - `RUST_LOG` overrides `[log] level` from the config file.
// ============================================================
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use witterstore::{repl_loop, Config, Session};

/// In-memory Witter index store.
#[derive(Parser, Debug)]
#[command(name = "witterstore", version)]
#[command(about = "Interactive user, weet and follow-graph index store")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}


fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        trend_limit = config.trends.limit,
        timestamp_format = %config.input.timestamp_format,
        "Witter index store ready"
    );

    // Hand off to the main command loop
    let mut session = Session::with_config(config);
    repl_loop(&mut session)?;
    Ok(())
}
