//! sensorctl - pressure sensor hex tool
//!
//! Normalizes hex dumps captured from the sensor, converts them to bytes,
//! decodes the 4-byte packets and stores readings in PostgreSQL.

mod commands;
mod input;
mod output;

use crate::commands::Commands;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sensorctl")]
#[command(about = "Pressure sensor hex decoder and PostgreSQL loader")]
#[command(long_about = "Pressure sensor hex decoder and PostgreSQL loader

Examples:
  sensorctl decode \"DE AD BE EF\"          # -> DEADBEEF / [0xDE, 0xAD, 0xBE, 0xEF]
  sensorctl encode 0xDE 0xAD 0xBE 0xEF     # -> DEADBEEF
  sensorctl packets 80050000800601f4       # Decode sensor packets
  cat dump.txt | sensorctl ingest -        # Store readings in PostgreSQL
  sensorctl db-status                      # Check the database")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (default: ./sensor.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let json = cli.json;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::log_error(&err);
            let info = output::error_info(&err);
            output::print_error(&info, json);
            ExitCode::from(info.code)
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = common::load_config(cli.config.as_deref())?;
    if cli.verbose {
        config.log.level = "debug".to_string();
    }
    if cli.no_color {
        config.log.ansi = false;
    }
    common::logging::init_with_config(&config.log)?;

    tracing::debug!("Database: {}", config.database.redacted_connection_string());

    commands::run(cli.command, &config, cli.json).await
}
