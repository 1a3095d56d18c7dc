//! Batch data-quality job for clinic intake records.
//!
//! Reads patient records from a file (JSON array or NDJSON), runs the
//! eligibility validation pipeline over each and reports the issues found.

pub mod batch;
mod cli;
pub mod config;
pub mod telemetry;

pub use batch::{parse_records, run_batch, BatchError, BatchOutcome, BatchSummary, RecordResult};
pub use cli::{EXIT_ERROR, EXIT_INVALID, EXIT_VALID};
pub use config::{CliConfig, ConfigError};

use std::process::ExitCode;

use clap::Parser;

/// Parse arguments, set up logging and run the selected command.
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    let config = CliConfig::load()?;
    telemetry::init(&config.log_level)?;
    cli::run(cli, &config)
}
