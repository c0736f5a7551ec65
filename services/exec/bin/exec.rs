//! Main Entrypoint for the Enclave Exec Tool
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and the command line.
//! 2. Initializing logging.
//! 3. Replaying the transcript through the response aggregator.
//! 4. Printing the outcome and mapping it to an exit status.

use anyhow::Context;
use clap::Parser;
use enclave_exec::{
    config::{Config, OutputFormat},
    render::{exit_status, render},
    transcript::replay,
};
use std::{path::PathBuf, process::ExitCode};
use tokio::io::BufReader;
use tracing::{error, info};

/// Exit status when the response stream itself broke.
const TRANSPORT_FAILURE_STATUS: u8 = 2;

#[derive(Parser, Debug)]
#[command(version, about = "Replays a recorded script execution response stream")]
struct Cli {
    /// JSON-lines transcript of response lines, or `-` to read stdin.
    transcript: PathBuf,

    /// Output format. Overrides OUTPUT_FORMAT.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;
    let format = cli.format.unwrap_or(config.output_format);

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(transcript = %cli.transcript.display(), ?format, "Replaying transcript");

    // --- 3. Replay ---
    let result = if cli.transcript.as_os_str() == "-" {
        replay(BufReader::new(tokio::io::stdin()), config.event_channel_capacity).await
    } else {
        let file = tokio::fs::File::open(&cli.transcript)
            .await
            .with_context(|| format!("Failed to open {}", cli.transcript.display()))?;
        replay(BufReader::new(file), config.event_channel_capacity).await
    };

    // --- 4. Report ---
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Replay did not complete");
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(TRANSPORT_FAILURE_STATUS));
        }
    };

    print!("{}", render(&outcome, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(ExitCode::from(exit_status(&outcome)))
}
