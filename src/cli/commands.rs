//! Command implementations for the station extremes CLI
//!
//! This module wires the line reader, the event processor and the line
//! writer together, sets up logging, and reports on each run.

use crate::app::adapters::ndjson::{LineReader, LineWriter};
use crate::app::services::event_processor::{EventProcessor, ProcessingStats};
use crate::cli::args::{Args, Commands, ProcessArgs, ReportFormat, ValidateArgs};
use crate::config::ProcessorConfig;
use crate::constants::LOG_TARGET;
use crate::models::Timestamp;
use crate::Error;
use anyhow::Context;
use chrono::{DateTime, Utc};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Outcome of driving one event stream to completion or to its first error
#[derive(Debug)]
pub struct RunReport {
    /// Counters collected by the processor
    pub stats: ProcessingStats,
    /// Stations held when the run ended
    pub stations_held: usize,
    /// Latest sample timestamp held when the run ended
    pub last_timestamp: Option<Timestamp>,
    /// Result records written to the output
    pub records_written: usize,
    /// Wall-clock time of the run
    pub elapsed: Duration,
    /// The error that halted the run, if any
    pub error: Option<Error>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Main command runner
///
/// Dispatches to the selected subcommand. A run that halts on malformed
/// input still produces its report before the error is returned.
pub fn run(args: Args) -> anyhow::Result<RunReport> {
    match args.command {
        Some(Commands::Process(process_args)) => run_process(process_args),
        Some(Commands::Validate(validate_args)) => run_validate(validate_args),
        None => anyhow::bail!("No command given"),
    }
}

/// Process an event stream and write result records
pub fn run_process(args: ProcessArgs) -> anyhow::Result<RunReport> {
    setup_logging(args.get_log_level(), args.quiet);
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.processor_config()?;

    let input = open_input(args.input_file())?;
    let output = open_output(args.output_file())?;

    let progress = args
        .show_progress()
        .then(|| create_progress_spinner("Processing events"));

    info!("Starting event processing");
    let report = run_stream(input, output, config, progress.as_ref());

    if let Some(pb) = &progress {
        pb.finish_with_message(format!("{} events processed", report.stats.events_read));
    }

    finish(args.report, "process", report)
}

/// Run the same pipeline but discard every result record
pub fn run_validate(args: ValidateArgs) -> anyhow::Result<RunReport> {
    setup_logging(args.get_log_level(), false);
    debug!("Validation arguments: {:?}", args);

    args.validate()?;

    let input = open_input(args.input_file())?;

    info!("Starting event stream validation");
    let report = run_stream(input, io::sink(), ProcessorConfig::default(), None);

    finish(args.report, "validate", report)
}

/// Drive a reader through the processor into a writer
///
/// Results produced before a failure remain written. The first read,
/// validation or write error halts the run and is carried in the report.
pub fn run_stream<R, W>(
    input: R,
    output: W,
    config: ProcessorConfig,
    progress: Option<&ProgressBar>,
) -> RunReport
where
    R: BufRead,
    W: Write,
{
    let start_time = Instant::now();
    let interval = config.progress_interval.max(1);
    let spinner = progress.cloned();
    let mut pulled: u64 = 0;

    let events = LineReader::new(input).inspect(move |_| {
        pulled += 1;
        if pulled % interval == 0 {
            if let Some(pb) = &spinner {
                pb.set_position(pulled);
            }
        }
    });

    let mut writer = LineWriter::new(output);
    let mut results = EventProcessor::new(config).process_results(events);
    let mut failure = None;

    for result in results.by_ref() {
        let written = result.and_then(|record| writer.write_record(&record));
        if let Err(e) = written {
            failure = Some(e);
            break;
        }
    }

    if let Err(e) = writer.flush() {
        failure.get_or_insert(e);
    }

    let mut stats = results.stats().clone();
    stats.halted = failure.is_some();

    RunReport {
        stats,
        stations_held: results.station_count(),
        last_timestamp: results.last_timestamp(),
        records_written: writer.records_written(),
        elapsed: start_time.elapsed(),
        error: failure,
    }
}

fn finish(format: ReportFormat, command: &str, mut report: RunReport) -> anyhow::Result<RunReport> {
    info!("{}", report.stats.summary());
    generate_report(format, command, &report)?;

    match report.error.take() {
        Some(e) => {
            error!("Run halted after {} events: {}", report.stats.events_read, e);
            Err(e.into())
        }
        None => Ok(report),
    }
}

/// Set up structured logging on stderr; stdout carries result records
fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    // try_init: a subscriber may already be installed when commands run in-process
    let installed = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            info!("Reading events from {}", path.display());
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Reading events from standard input");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            info!("Writing results to {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} events {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Render an epoch-millisecond timestamp for humans
fn format_timestamp(timestamp: Option<Timestamp>) -> String {
    match timestamp {
        Some(ms) => match DateTime::<Utc>::from_timestamp_millis(ms) {
            Some(at) => format!("{} ({})", ms, at.to_rfc3339()),
            None => ms.to_string(),
        },
        None => "none".to_string(),
    }
}

fn generate_report(format: ReportFormat, command: &str, report: &RunReport) -> anyhow::Result<()> {
    match format {
        ReportFormat::Human => generate_human_report(command, report),
        ReportFormat::Json => generate_json_report(command, report),
        ReportFormat::Off => Ok(()),
    }
}

/// Generate human-readable report on stderr
fn generate_human_report(command: &str, report: &RunReport) -> anyhow::Result<()> {
    let stats = &report.stats;
    let mut out = io::stderr().lock();

    if report.is_success() {
        writeln!(out, "\n{}", format!("Event {} complete", command).bright_green().bold())?;
    } else {
        writeln!(out, "\n{}", format!("Event {} halted", command).bright_red().bold())?;
    }
    writeln!(out, "  {} {}", "Events read:".bright_cyan(), stats.events_read)?;
    writeln!(out, "  {} {}", "Samples accepted:".bright_cyan(), stats.samples_accepted)?;
    writeln!(
        out,
        "  {} {} snapshots, {} resets",
        "Results emitted:".bright_cyan(),
        stats.snapshots_emitted,
        stats.resets_emitted
    )?;
    if stats.results_suppressed > 0 {
        writeln!(out, "  {} {}", "Results suppressed:".bright_cyan(), stats.results_suppressed)?;
    }
    writeln!(out, "  {} {}", "Stations held:".bright_cyan(), report.stations_held)?;
    writeln!(
        out,
        "  {} {}",
        "Latest timestamp:".bright_cyan(),
        format_timestamp(report.last_timestamp)
    )?;
    writeln!(
        out,
        "  {} {}",
        "Processing time:".bright_cyan(),
        HumanDuration(report.elapsed)
    )?;

    if let Some(e) = &report.error {
        writeln!(out, "  {} {}", "Error:".bright_red(), e)?;
    }

    writeln!(out)?;
    Ok(())
}

/// Generate JSON report for machine consumption on stderr
fn generate_json_report(command: &str, report: &RunReport) -> anyhow::Result<()> {
    let json_report = serde_json::json!({
        "command": command,
        "success": report.is_success(),
        "stats": report.stats,
        "stations_held": report.stations_held,
        "last_timestamp": report.last_timestamp,
        "records_written": report.records_written,
        "processing_time_seconds": report.elapsed.as_secs_f64(),
        "error": report.error.as_ref().map(|e| e.to_string()),
    });

    let mut out = io::stderr().lock();
    serde_json::to_writer_pretty(&mut out, &json_report)?;
    writeln!(out)?;
    Ok(())
}
