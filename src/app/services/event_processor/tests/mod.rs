//! Tests for the event processor module
//!
//! Unit tests for decoding, aggregation, dispatch and statistics.

pub mod decoder_tests;

// Test helper functions and fixtures
use crate::app::services::event_processor::EventProcessor;
use crate::config::ProcessorConfig;
use crate::models::ResultRecord;
use crate::Result;
use serde_json::{Value, json};

pub const FOSTER: &str = "Foster Weather Station";
pub const OAK_STREET: &str = "Oak Street Weather Station";

/// Create a sample record as it arrives on the wire
pub fn sample(station_name: &str, timestamp: i64, temperature: f64) -> Value {
    json!({
        "type": "sample",
        "stationName": station_name,
        "timestamp": timestamp,
        "temperature": temperature
    })
}

/// Create a control record as it arrives on the wire
pub fn control(command: &str) -> Value {
    json!({"type": "control", "command": command})
}

pub fn snapshot() -> Value {
    control("snapshot")
}

pub fn reset() -> Value {
    control("reset")
}

/// Run a fresh default processor over the events and collect every result
pub fn run(events: Vec<Value>) -> Result<Vec<ResultRecord>> {
    run_with(ProcessorConfig::default(), events)
}

pub fn run_with(config: ProcessorConfig, events: Vec<Value>) -> Result<Vec<ResultRecord>> {
    EventProcessor::new(config).process(events).collect()
}

/// Configuration reproducing the quiet legacy behaviour
pub fn create_suppressing_config() -> ProcessorConfig {
    ProcessorConfig::default().with_suppress_empty_results(true)
}
