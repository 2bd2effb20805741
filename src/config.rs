//! Configuration management and validation.
//!
//! Provides the processor configuration with defaults, builder-style
//! overrides applied from the command line, and validation rules.

use crate::constants::DEFAULT_PROGRESS_INTERVAL;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for one processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Drop snapshot results with no stations and reset results with no `asOf`
    /// instead of emitting them
    pub suppress_empty_results: bool,

    /// Events between progress updates when a progress indicator is shown
    pub progress_interval: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            suppress_empty_results: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ProcessorConfig {
    /// Suppress results for control commands issued while no data is held
    pub fn with_suppress_empty_results(mut self, suppress: bool) -> Self {
        self.suppress_empty_results = suppress;
        self
    }

    /// Set the progress update interval
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(Error::configuration(
                "Progress interval must be greater than 0",
            ));
        }

        debug!("Processor configuration validated: {:?}", self);
        Ok(())
    }
}
