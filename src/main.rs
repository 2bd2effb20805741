use clap::Parser;
use station_extremes::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_report) => {
            // Success - the report has already been written by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Station Extremes - Weather Station High/Low Tracker");
    println!("===================================================");
    println!();
    println!("Reads newline-delimited JSON weather samples and control commands,");
    println!("tracks per-station high/low temperatures, and answers snapshot and");
    println!("reset commands with JSON result records.");
    println!();
    println!("USAGE:");
    println!("    station-extremes <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process an event stream and write result records");
    println!("    validate    Check an event stream for malformed records");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Stream events from stdin to stdout:");
    println!("    cat events.ndjson | station-extremes process");
    println!();
    println!("    # Process a file, writing results to another file:");
    println!("    station-extremes process --input events.ndjson --output results.ndjson");
    println!();
    println!("    # Check a file without producing results:");
    println!("    station-extremes validate --input events.ndjson --report json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    station-extremes <COMMAND> --help");
}
