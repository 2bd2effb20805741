//! Run statistics for the event processor
//!
//! Counters are updated as events are dispatched so a caller can report on a
//! run even when it halted part way through.

use crate::models::ControlCommand;
use serde::Serialize;

/// Statistics for one processing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    /// Records pulled from the input sequence, including one that failed validation
    pub events_read: usize,
    /// Weather samples folded into the station table
    pub samples_accepted: usize,
    /// Snapshot results produced
    pub snapshots_emitted: usize,
    /// Reset results produced
    pub resets_emitted: usize,
    /// Control commands answered with no result because no data was held
    pub results_suppressed: usize,
    /// Whether the run stopped on an error
    pub halted: bool,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted result for the given command
    pub fn record_result(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Snapshot => self.snapshots_emitted += 1,
            ControlCommand::Reset => self.resets_emitted += 1,
        }
    }

    /// Total results produced
    pub fn results_emitted(&self) -> usize {
        self.snapshots_emitted + self.resets_emitted
    }

    /// Control commands handled, whether answered or suppressed
    pub fn controls_handled(&self) -> usize {
        self.results_emitted() + self.results_suppressed
    }

    /// Get summary of the run for logging
    pub fn summary(&self) -> String {
        format!(
            "Processing Summary: {} events read | Samples: {} | \
             Snapshots: {} | Resets: {} | Suppressed: {}{}",
            self.events_read,
            self.samples_accepted,
            self.snapshots_emitted,
            self.resets_emitted,
            self.results_suppressed,
            if self.halted { " | halted on error" } else { "" }
        )
    }
}
