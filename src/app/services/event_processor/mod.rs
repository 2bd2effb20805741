//! Event processing module for weather samples and control commands
//!
//! This module turns a sequence of loosely-typed input records into a
//! sequence of result records while maintaining per-station high/low
//! temperature aggregates across the whole run.
//!
//! # Architecture
//!
//! - [`decoder`] - Validates a generic JSON value into a typed event
//! - [`station_table`] - Per-station aggregates and the latest timestamp
//! - [`processor`] - Dispatch rules and the pull-based result iterator
//! - [`stats`] - Run counters used for reporting
//!
//! # Dispatch Rules
//!
//! 1. **Sample**: folded into the station table, produces nothing
//! 2. **Snapshot**: copies every station's high/low with the latest timestamp
//! 3. **Reset**: clears the table and confirms with the timestamp it held
//!
//! Any malformed record halts the run with a typed error. Nothing is
//! skipped and no partial result is produced for the failing record.
//!
//! # Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use station_extremes::app::services::event_processor::EventProcessor;
//! use station_extremes::config::ProcessorConfig;
//!
//! let events = vec![
//!     json!({"type": "sample", "stationName": "A", "timestamp": 1000, "temperature": 25.0}),
//!     json!({"type": "control", "command": "reset"}),
//!     json!({"type": "control", "command": "snapshot"}),
//! ];
//!
//! let mut results = EventProcessor::new(ProcessorConfig::default()).process(events);
//! let reset = results.next().unwrap().unwrap();
//! let snapshot = results.next().unwrap().unwrap();
//!
//! assert_eq!(reset.as_of(), Some(1000));
//! assert_eq!(snapshot.as_of(), None);
//! assert!(results.next().is_none());
//! ```

pub mod decoder;
pub mod processor;
pub mod station_table;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decoder::decode_event;
pub use processor::{EventProcessor, InfallibleEvents, ProcessEvents};
pub use station_table::{StationAggregate, StationTable};
pub use stats::ProcessingStats;
