//! Per-station temperature aggregates
//!
//! The station table owns every aggregate for one processing run together
//! with the latest sample timestamp. Stations keep the order in which they
//! were first seen so snapshots are deterministic.

use crate::models::{Sample, StationExtremes, StationSnapshot, Timestamp};
use std::collections::HashMap;

/// Running high/low for a single station
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationAggregate {
    pub high: f64,
    pub low: f64,
}

impl StationAggregate {
    /// Start an aggregate from its first reading
    pub fn new(temperature: f64) -> Self {
        Self {
            high: temperature,
            low: temperature,
        }
    }

    /// Fold another reading into the aggregate
    pub fn record(&mut self, temperature: f64) {
        if temperature > self.high {
            self.high = temperature;
        }
        if temperature < self.low {
            self.low = temperature;
        }
    }

    pub fn extremes(&self) -> StationExtremes {
        StationExtremes {
            high: self.high,
            low: self.low,
        }
    }
}

/// Mapping from station name to aggregate, plus the latest timestamp seen
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    /// Aggregates in first-seen order
    stations: Vec<(String, StationAggregate)>,
    /// Station name -> position in `stations`
    index: HashMap<String, usize>,
    /// Maximum timestamp across accepted samples; `None` until the first one
    last_timestamp: Option<Timestamp>,
}

impl StationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a validated sample into the table
    ///
    /// Returns `true` when the sample introduced a new station.
    pub fn apply_sample(&mut self, sample: &Sample) -> bool {
        self.last_timestamp = Some(match self.last_timestamp {
            Some(latest) => latest.max(sample.timestamp),
            None => sample.timestamp,
        });

        match self.index.get(&sample.station_name) {
            Some(&position) => {
                self.stations[position].1.record(sample.temperature);
                false
            }
            None => {
                self.index
                    .insert(sample.station_name.clone(), self.stations.len());
                self.stations.push((
                    sample.station_name.clone(),
                    StationAggregate::new(sample.temperature),
                ));
                true
            }
        }
    }

    /// Copy every station's extremes without mutating the table
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot::new(
            self.stations
                .iter()
                .map(|(name, aggregate)| (name.clone(), aggregate.extremes()))
                .collect(),
        )
    }

    /// Clear every aggregate and the latest timestamp
    ///
    /// Returns the timestamp that was current before clearing.
    pub fn reset(&mut self) -> Option<Timestamp> {
        self.stations.clear();
        self.index.clear();
        self.last_timestamp.take()
    }

    pub fn get(&self, station_name: &str) -> Option<&StationAggregate> {
        self.index
            .get(station_name)
            .map(|&position| &self.stations[position].1)
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_timestamp
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
