//! Decoding of generic JSON values into typed events
//!
//! Each input record arrives as an untyped [`serde_json::Value`]. This module
//! validates its shape once and produces a strict [`Event`], turning every
//! malformed record into one of the three validation errors.

use crate::constants::{FIELD_TYPE, fields, message_types};
use crate::models::{ControlCommand, Event, Sample};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Decode a generic input record into a typed event
pub fn decode_event(value: &Value) -> Result<Event> {
    let Some(record) = value.as_object() else {
        return Err(Error::unknown_message_type(None));
    };

    match record.get(FIELD_TYPE).and_then(Value::as_str) {
        Some(message_types::SAMPLE) => decode_sample(record).map(Event::Sample),
        Some(message_types::CONTROL) => decode_control(record).map(Event::Control),
        other => Err(Error::unknown_message_type(other)),
    }
}

/// Validate the three sample fields
fn decode_sample(record: &Map<String, Value>) -> Result<Sample> {
    let station_name = match record.get(fields::STATION_NAME) {
        None | Some(Value::Null) => {
            return Err(Error::missing_field(fields::STATION_NAME, "is missing"));
        }
        Some(Value::String(name)) if name.is_empty() => {
            return Err(Error::missing_field(fields::STATION_NAME, "is empty"));
        }
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(Error::missing_field(
                fields::STATION_NAME,
                format!("must be a string, found {}", kind_of(other)),
            ));
        }
    };

    let timestamp = match record.get(fields::TIMESTAMP) {
        None | Some(Value::Null) => {
            return Err(Error::missing_field(fields::TIMESTAMP, "is missing"));
        }
        Some(value) => value.as_i64().ok_or_else(|| {
            Error::missing_field(
                fields::TIMESTAMP,
                format!("must be an integer, found {}", kind_of(value)),
            )
        })?,
    };

    let temperature = match record.get(fields::TEMPERATURE) {
        None | Some(Value::Null) => {
            return Err(Error::missing_field(fields::TEMPERATURE, "is missing"));
        }
        Some(value) => value.as_f64().ok_or_else(|| {
            Error::missing_field(
                fields::TEMPERATURE,
                format!("must be a number, found {}", kind_of(value)),
            )
        })?,
    };

    Ok(Sample {
        station_name,
        timestamp,
        temperature,
    })
}

fn decode_control(record: &Map<String, Value>) -> Result<ControlCommand> {
    let command = record.get(fields::COMMAND).and_then(Value::as_str);
    command
        .and_then(ControlCommand::from_name)
        .ok_or_else(|| Error::unknown_command(command))
}

/// Describe a JSON value's kind for error messages
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer out of range",
        Value::Number(_) => "non-integer number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
