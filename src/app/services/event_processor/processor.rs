//! Event dispatch and the lazy result sequence
//!
//! [`EventProcessor`] owns the station table for one run and dispatches each
//! event against it. [`ProcessEvents`] adapts a processor and an input
//! iterator into a pull-based iterator of result records: each call to
//! `next` consumes input only until the next result (or error) is ready.

use crate::config::ProcessorConfig;
use crate::models::{ControlCommand, Event, ResultRecord, Sample, Timestamp};
use crate::Result;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{decoder::decode_event, station_table::StationTable, stats::ProcessingStats};

/// Input adapter used by [`EventProcessor::process`] for sources that cannot fail
pub type InfallibleEvents<I> = std::iter::Map<I, fn(Value) -> Result<Value>>;

/// Processor for weather samples and control commands
///
/// A processor is created fresh for every run and is not restartable: its
/// state is the aggregate of everything it has been fed.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use station_extremes::{EventProcessor, ProcessorConfig, ResultRecord};
///
/// let events = vec![
///     json!({"type": "sample", "stationName": "A", "timestamp": 1000, "temperature": 25.0}),
///     json!({"type": "control", "command": "snapshot"}),
/// ];
///
/// let results: Vec<ResultRecord> = EventProcessor::new(ProcessorConfig::default())
///     .process(events)
///     .collect::<station_extremes::Result<_>>()
///     .unwrap();
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].as_of(), Some(1000));
/// ```
#[derive(Debug, Default)]
pub struct EventProcessor {
    config: ProcessorConfig,
    table: StationTable,
    stats: ProcessingStats,
}

impl EventProcessor {
    /// Create a processor with empty state
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            table: StationTable::new(),
            stats: ProcessingStats::new(),
        }
    }

    /// Decode a generic record and dispatch it
    ///
    /// Validation failures leave the station table untouched.
    pub fn handle_value(&mut self, value: &Value) -> Result<Option<ResultRecord>> {
        self.stats.events_read += 1;
        let event = decode_event(value).inspect_err(|error| {
            warn!("Rejecting event {}: {}", self.stats.events_read, error);
        })?;
        Ok(self.apply(event))
    }

    /// Dispatch an already validated event
    pub fn apply(&mut self, event: Event) -> Option<ResultRecord> {
        match event {
            Event::Sample(sample) => {
                self.apply_sample(&sample);
                None
            }
            Event::Control(command) => self.apply_control(command),
        }
    }

    fn apply_sample(&mut self, sample: &Sample) {
        let new_station = self.table.apply_sample(sample);
        self.stats.samples_accepted += 1;

        trace!(
            station = %sample.station_name,
            timestamp = sample.timestamp,
            temperature = sample.temperature,
            new_station,
            "Sample accepted"
        );
    }

    fn apply_control(&mut self, command: ControlCommand) -> Option<ResultRecord> {
        let record = match command {
            ControlCommand::Snapshot => ResultRecord::Snapshot {
                as_of: self.table.last_timestamp(),
                stations: self.table.snapshot(),
            },
            ControlCommand::Reset => ResultRecord::Reset {
                as_of: self.table.reset(),
            },
        };

        debug!(
            "Control '{}' handled: asOf={:?}, {} stations held",
            command,
            record.as_of(),
            self.table.len()
        );

        if self.config.suppress_empty_results && is_empty_result(&record) {
            self.stats.results_suppressed += 1;
            debug!("Suppressing empty '{}' result", command);
            return None;
        }

        self.stats.record_result(command);
        Some(record)
    }

    /// Drive the processor over a sequence of generic records
    pub fn process<I>(self, events: I) -> ProcessEvents<InfallibleEvents<I::IntoIter>>
    where
        I: IntoIterator<Item = Value>,
    {
        let wrap: fn(Value) -> Result<Value> = Ok;
        ProcessEvents::new(self, events.into_iter().map(wrap))
    }

    /// Drive the processor over a fallible record source such as a line reader
    ///
    /// A source error halts the run exactly like a validation error.
    pub fn process_results<I>(self, events: I) -> ProcessEvents<I::IntoIter>
    where
        I: IntoIterator<Item = Result<Value>>,
    {
        ProcessEvents::new(self, events.into_iter())
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Number of stations currently aggregated
    pub fn station_count(&self) -> usize {
        self.table.len()
    }

    /// Latest sample timestamp since start or the last reset
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.table.last_timestamp()
    }

    pub fn station_table(&self) -> &StationTable {
        &self.table
    }
}

fn is_empty_result(record: &ResultRecord) -> bool {
    match record {
        ResultRecord::Snapshot { stations, .. } => stations.is_empty(),
        ResultRecord::Reset { as_of } => as_of.is_none(),
    }
}

/// Lazy sequence of result records over an input sequence
///
/// Yields `Ok(record)` for each control command answered and at most one
/// `Err`, after which the sequence is finished and no further input is read.
#[derive(Debug)]
pub struct ProcessEvents<I> {
    processor: EventProcessor,
    events: I,
    halted: bool,
}

impl<I> ProcessEvents<I> {
    fn new(processor: EventProcessor, events: I) -> Self {
        Self {
            processor,
            events,
            halted: false,
        }
    }

    pub fn stats(&self) -> &ProcessingStats {
        self.processor.stats()
    }

    pub fn station_count(&self) -> usize {
        self.processor.station_count()
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.processor.last_timestamp()
    }

    /// Give back the processor, e.g. to inspect final state
    pub fn into_processor(self) -> EventProcessor {
        self.processor
    }

    fn halt(&mut self) {
        self.halted = true;
        self.processor.stats.halted = true;
    }
}

impl<I> Iterator for ProcessEvents<I>
where
    I: Iterator<Item = Result<Value>>,
{
    type Item = Result<ResultRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        loop {
            let outcome = match self.events.next()? {
                Ok(value) => self.processor.handle_value(&value),
                Err(error) => Err(error),
            };

            match outcome {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(error) => {
                    self.halt();
                    return Some(Err(error));
                }
            }
        }
    }
}
