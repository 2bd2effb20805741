//! Core data structures for weather events and result records.
//!
//! Input events are decoded once at the boundary into the strict [`Event`]
//! sum type. Result records serialize to the output wire format:
//! `type`, `asOf` (always present, `null` when unknown) and, for snapshots,
//! `stations` keyed by station name in first-seen order.

use crate::constants::commands;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Milliseconds since the Unix epoch, as carried by weather samples
pub type Timestamp = i64;

/// A single temperature reading from one station
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub station_name: String,
    pub timestamp: Timestamp,
    pub temperature: f64,
}

/// Operator control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCommand {
    Snapshot,
    Reset,
}

impl ControlCommand {
    /// Parse a wire command name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            commands::SNAPSHOT => Some(ControlCommand::Snapshot),
            commands::RESET => Some(ControlCommand::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlCommand::Snapshot => commands::SNAPSHOT,
            ControlCommand::Reset => commands::RESET,
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated input event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Sample(Sample),
    Control(ControlCommand),
}

impl Event {
    /// Convenience constructor for a sample event
    pub fn sample(station_name: impl Into<String>, timestamp: Timestamp, temperature: f64) -> Self {
        Event::Sample(Sample {
            station_name: station_name.into(),
            timestamp,
            temperature,
        })
    }
}

/// High/low temperatures reported for one station
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationExtremes {
    pub high: f64,
    pub low: f64,
}

/// Point-in-time copy of every station's extremes, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSnapshot {
    entries: Vec<(String, StationExtremes)>,
}

impl StationSnapshot {
    pub fn new(entries: Vec<(String, StationExtremes)>) -> Self {
        Self { entries }
    }

    /// Look up a station by name
    pub fn get(&self, station_name: &str) -> Option<&StationExtremes> {
        self.entries
            .iter()
            .find(|(name, _)| name == station_name)
            .map(|(_, extremes)| extremes)
    }

    /// Station names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StationExtremes)> {
        self.entries
            .iter()
            .map(|(name, extremes)| (name.as_str(), extremes))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StationSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, extremes) in &self.entries {
            map.serialize_entry(name, extremes)?;
        }
        map.end()
    }
}

/// Output record produced in response to a control command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultRecord {
    Snapshot {
        #[serde(rename = "asOf")]
        as_of: Option<Timestamp>,
        stations: StationSnapshot,
    },
    Reset {
        #[serde(rename = "asOf")]
        as_of: Option<Timestamp>,
    },
}

impl ResultRecord {
    /// Timestamp the record was produced against
    pub fn as_of(&self) -> Option<Timestamp> {
        match self {
            ResultRecord::Snapshot { as_of, .. } | ResultRecord::Reset { as_of } => *as_of,
        }
    }

    /// The control command this record answers
    pub fn command(&self) -> ControlCommand {
        match self {
            ResultRecord::Snapshot { .. } => ControlCommand::Snapshot,
            ResultRecord::Reset { .. } => ControlCommand::Reset,
        }
    }

    /// Stations carried by a snapshot record
    pub fn stations(&self) -> Option<&StationSnapshot> {
        match self {
            ResultRecord::Snapshot { stations, .. } => Some(stations),
            ResultRecord::Reset { .. } => None,
        }
    }
}
