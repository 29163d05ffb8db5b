//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `spoof_check` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Report output and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use spoof_check::error_handling::{exit_code_for_error, EXIT_INVALID_INPUT, EXIT_SUCCESS};
use spoof_check::initialization::init_logger_with;
use spoof_check::report::render;
use spoof_check::{run_analysis, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load SPOOF_CHECK_* settings from a .env file if one exists
    let _ = dotenvy::dotenv();

    // Parse command-line arguments into Config; usage errors are invalid input
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(EXIT_SUCCESS),
                _ => process::exit(EXIT_INVALID_INPUT),
            }
        }
    };

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let format = config.format;
    match run_analysis(config).await {
        Ok(report) => {
            let output = render(&report.target, &report.assessment, format)
                .context("Failed to render report")?;
            println!("{output}");
            process::exit(report.exit_code());
        }
        Err(e) => {
            eprintln!("spoof_check error: {e:#}");
            process::exit(exit_code_for_error(&e));
        }
    }
}
