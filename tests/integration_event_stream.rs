//! Integration tests for the NDJSON event pipeline
//!
//! These tests drive the line reader, event processor and line writer
//! end-to-end over in-memory buffers and temporary files.

use serde_json::{Value, json};
use station_extremes::cli::commands::run_stream;
use station_extremes::{Error, EventProcessor, LineReader, LineWriter, ProcessorConfig};
use std::fs::File;
use std::io::{BufReader, Cursor, Write};
use tempfile::NamedTempFile;

fn to_ndjson(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("{}\n", event))
        .collect()
}

fn parse_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Purpose: Validate the full read-process-write loop over a realistic stream
/// Benefit: Ensures adapters and processor agree on the wire format
#[test]
fn test_stream_round_trip_multiple_stations() {
    let events = vec![
        json!({"type": "sample", "stationName": "Foster Weather Station", "timestamp": 1672531200000i64, "temperature": 37.1}),
        json!({"type": "sample", "stationName": "Oak Street Weather Station", "timestamp": 1672531260000i64, "temperature": 42.5}),
        json!({"type": "sample", "stationName": "Foster Weather Station", "timestamp": 1672531320000i64, "temperature": 32.5}),
        json!({"type": "control", "command": "snapshot"}),
        json!({"type": "control", "command": "reset"}),
        json!({"type": "control", "command": "snapshot"}),
    ];

    let mut output = Vec::new();
    let report = run_stream(
        Cursor::new(to_ndjson(&events)),
        &mut output,
        ProcessorConfig::default(),
        None,
    );

    assert!(report.is_success());
    assert_eq!(report.records_written, 3);
    assert_eq!(report.stats.samples_accepted, 3);

    let results = parse_lines(&output);
    assert_eq!(
        results,
        vec![
            json!({
                "type": "snapshot",
                "asOf": 1672531320000i64,
                "stations": {
                    "Foster Weather Station": {"high": 37.1, "low": 32.5},
                    "Oak Street Weather Station": {"high": 42.5, "low": 42.5}
                }
            }),
            json!({"type": "reset", "asOf": 1672531320000i64}),
            json!({"type": "snapshot", "asOf": null, "stations": {}}),
        ]
    );
}

/// Purpose: Validate that snapshot output lists stations in first-seen order
/// Benefit: Guarantees deterministic output for downstream diffing
#[test]
fn test_snapshot_output_is_deterministic() {
    let input = concat!(
        "{\"type\":\"sample\",\"stationName\":\"Zulu\",\"timestamp\":3,\"temperature\":1.0}\n",
        "{\"type\":\"sample\",\"stationName\":\"Alpha\",\"timestamp\":2,\"temperature\":2.0}\n",
        "{\"type\":\"sample\",\"stationName\":\"Mike\",\"timestamp\":1,\"temperature\":3.0}\n",
        "{\"type\":\"control\",\"command\":\"snapshot\"}\n",
    );

    let mut output = Vec::new();
    run_stream(Cursor::new(input), &mut output, ProcessorConfig::default(), None);

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "{\"type\":\"snapshot\",\"asOf\":3,\"stations\":{\
         \"Zulu\":{\"high\":1.0,\"low\":1.0},\
         \"Alpha\":{\"high\":2.0,\"low\":2.0},\
         \"Mike\":{\"high\":3.0,\"low\":3.0}}}\n"
    );
}

/// Purpose: Validate processing from a file on disk
/// Benefit: Exercises the buffered file path used by the CLI
#[test]
fn test_process_events_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "{}",
        json!({"type": "sample", "stationName": "A", "timestamp": 1000, "temperature": 25.0})
    )
    .unwrap();
    writeln!(file).unwrap();
    writeln!(file, "{}", json!({"type": "control", "command": "snapshot"})).unwrap();
    file.flush().unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    let mut writer = LineWriter::new(Vec::new());

    let mut results = EventProcessor::new(ProcessorConfig::default())
        .process_results(LineReader::new(reader));
    for record in results.by_ref() {
        writer.write_record(&record.unwrap()).unwrap();
    }

    assert_eq!(results.stats().events_read, 2);
    assert_eq!(writer.records_written(), 1);
    assert_eq!(
        parse_lines(&writer.into_inner().unwrap()),
        vec![json!({"type": "snapshot", "asOf": 1000, "stations": {"A": {"high": 25.0, "low": 25.0}}})]
    );
}

/// Purpose: Validate that a malformed sample halts the stream with no partial output
/// Benefit: Confirms the fail-fast contract at the pipeline level
#[test]
fn test_malformed_sample_halts_stream() {
    let input = concat!(
        "{\"type\":\"sample\",\"stationName\":\"A\"}\n",
        "{\"type\":\"control\",\"command\":\"snapshot\"}\n",
    );

    let mut output = Vec::new();
    let report = run_stream(Cursor::new(input), &mut output, ProcessorConfig::default(), None);

    assert!(matches!(report.error, Some(Error::MissingField { .. })));
    assert!(report.stats.halted);
    assert_eq!(report.stats.events_read, 1);
    assert_eq!(report.records_written, 0);
    assert!(output.is_empty());
}

/// Purpose: Validate that the suppressing configuration reproduces quiet output
/// Benefit: Ensures the legacy mode is reachable end-to-end
#[test]
fn test_suppressed_empty_results_end_to_end() {
    let input = to_ndjson(&[
        json!({"type": "control", "command": "snapshot"}),
        json!({"type": "control", "command": "reset"}),
    ]);

    let mut output = Vec::new();
    let report = run_stream(
        Cursor::new(input),
        &mut output,
        ProcessorConfig::default().with_suppress_empty_results(true),
        None,
    );

    assert!(report.is_success());
    assert_eq!(report.stats.results_suppressed, 2);
    assert!(output.is_empty());
}
