//! Station Extremes Library
//!
//! A Rust library for folding a stream of weather station readings and
//! operator control commands into per-station high/low temperature results.
//!
//! This library provides tools for:
//! - Decoding loosely-typed JSON records into strict sample/control events
//! - Maintaining running per-station high/low aggregates in first-seen order
//! - Answering snapshot and reset commands with JSON result records
//! - Reading and writing newline-delimited JSON streams
//! - Typed errors that halt a run on the first malformed record

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Core application modules
pub mod app {
    pub mod services {
        pub mod event_processor;
    }
    pub mod adapters {
        pub mod ndjson;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::ndjson::{LineReader, LineWriter};
pub use app::services::event_processor::{EventProcessor, ProcessEvents, ProcessingStats};
pub use config::ProcessorConfig;
pub use error::{Error, Result};
pub use models::{ControlCommand, Event, ResultRecord, Sample, StationExtremes, Timestamp};
