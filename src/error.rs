//! Error handling for event processing.
//!
//! Validation failures (malformed samples, unknown message types, unknown
//! control commands) halt a run. Boundary failures from the line reader and
//! writer share the same enum so a caller sees one error type per run.

use thiserror::Error;

/// Result type alias for station extremes processing
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A weather sample lacks a required field or carries one of the wrong kind
    #[error("Please verify input. Weather sample missing required fields: '{field}' {reason}")]
    MissingField { field: &'static str, reason: String },

    /// The `type` discriminator is absent or not a known message type
    #[error("Please verify input. Unknown message type: {}", display_or_none(.message_type))]
    UnknownMessageType { message_type: Option<String> },

    /// A control message carries an unrecognised command
    #[error("Please verify input. Unknown control command: {}", display_or_none(.command))]
    UnknownCommand { command: Option<String> },

    /// An input line could not be decoded as JSON
    #[error("Malformed JSON on line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A result record could not be encoded
    #[error("Failed to encode result record: {0}")]
    Encoding(#[source] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn display_or_none(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("'{}'", value),
        None => "none".to_string(),
    }
}

impl Error {
    /// Create a missing field error for a weather sample
    pub fn missing_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MissingField {
            field,
            reason: reason.into(),
        }
    }

    /// Create an unknown message type error
    pub fn unknown_message_type(message_type: Option<&str>) -> Self {
        Self::UnknownMessageType {
            message_type: message_type.map(str::to_string),
        }
    }

    /// Create an unknown control command error
    pub fn unknown_command(command: Option<&str>) -> Self {
        Self::UnknownCommand {
            command: command.map(str::to_string),
        }
    }

    /// Create a malformed line error
    pub fn malformed_line(line: usize, source: serde_json::Error) -> Self {
        Self::MalformedLine { line, source }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for the three input validation kinds
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::UnknownMessageType { .. } | Self::UnknownCommand { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
