//! Command-line argument definitions for the station extremes processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ProcessorConfig;
use crate::constants::{DEFAULT_PROGRESS_INTERVAL, STDIO_PATH};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the station extremes processor
///
/// Reads newline-delimited JSON weather samples and control commands and
/// writes snapshot/reset result records as newline-delimited JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "station-extremes",
    version,
    about = "Track per-station high/low temperatures from a stream of JSON events",
    long_about = "Consumes newline-delimited JSON weather samples and control commands, \
                  maintains running high/low temperatures for every station, and answers \
                  snapshot and reset commands with JSON result records. Processing stops \
                  at the first malformed record."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process an event stream and write result records
    Process(ProcessArgs),
    /// Check an event stream for malformed records without writing results
    Validate(ValidateArgs),
}

/// Run report format written to stderr after processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Human,
    /// JSON for machine consumption
    Json,
    /// No report
    Off,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input file of newline-delimited JSON events
    ///
    /// Reads standard input when omitted or set to "-".
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Output file for newline-delimited JSON result records
    ///
    /// Writes standard output when omitted or set to "-".
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Emit nothing for snapshot/reset commands issued while no data is held
    #[arg(long = "suppress-empty")]
    pub suppress_empty: bool,

    /// Show a progress spinner on stderr
    #[arg(long = "progress")]
    pub progress: bool,

    /// Events between progress spinner updates
    #[arg(
        long = "progress-interval",
        value_name = "COUNT",
        default_value_t = DEFAULT_PROGRESS_INTERVAL
    )]
    pub progress_interval: u64,

    /// Run report format
    #[arg(long = "report", value_enum, default_value_t = ReportFormat::Human)]
    pub report: ReportFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    ///
    /// Overrides verbose settings and disables the progress spinner.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input file of newline-delimited JSON events
    ///
    /// Reads standard input when omitted or set to "-".
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Run report format
    #[arg(long = "report", value_enum, default_value_t = ReportFormat::Human)]
    pub report: ReportFormat,

    /// Logging verbosity level
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Treat "-" as the standard stream
fn file_path(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|path| *path != Path::new(STDIO_PATH))
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = self.input_file() {
            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(output_path) = self.output_file() {
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn input_file(&self) -> Option<&Path> {
        file_path(&self.input_path)
    }

    pub fn output_file(&self) -> Option<&Path> {
        file_path(&self.output_path)
    }

    /// Build the processor configuration from defaults and flags
    pub fn processor_config(&self) -> Result<ProcessorConfig> {
        let config = ProcessorConfig::default()
            .with_suppress_empty_results(self.suppress_empty)
            .with_progress_interval(self.progress_interval);
        config.validate()?;
        Ok(config)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Progress is only shown on request and never in quiet mode
    pub fn show_progress(&self) -> bool {
        self.progress && !self.quiet
    }
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = self.input_file() {
            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn input_file(&self) -> Option<&Path> {
        file_path(&self.input_path)
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}
