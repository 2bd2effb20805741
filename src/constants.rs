//! Application constants for the station extremes processor
//!
//! Wire-level field names and message discriminators shared by the decoder
//! and the result records, plus CLI defaults.

// =============================================================================
// Input Record Fields
// =============================================================================

/// Discriminator field present on every input and output record
pub const FIELD_TYPE: &str = "type";

/// Input record field names
pub mod fields {
    pub const STATION_NAME: &str = "stationName";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TEMPERATURE: &str = "temperature";
    pub const COMMAND: &str = "command";
}

/// Accepted values of the input `type` field
pub mod message_types {
    pub const SAMPLE: &str = "sample";
    pub const CONTROL: &str = "control";
}

/// Accepted values of the control `command` field
pub mod commands {
    pub const SNAPSHOT: &str = "snapshot";
    pub const RESET: &str = "reset";
}

// =============================================================================
// Processing Defaults
// =============================================================================

/// Number of events between progress spinner updates
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Path placeholder meaning stdin/stdout
pub const STDIO_PATH: &str = "-";

/// Crate name used for the default tracing filter directive
pub const LOG_TARGET: &str = "station_extremes";
