//! Tests for decoding generic records into typed events

use super::*;
use crate::Error;
use crate::app::services::event_processor::decode_event;
use crate::models::{ControlCommand, Event};

#[test]
fn test_decode_sample() {
    let event = decode_event(&sample(FOSTER, 1672531200000, 37.1)).unwrap();
    assert_eq!(event, Event::sample(FOSTER, 1672531200000, 37.1));
}

#[test]
fn test_decode_sample_accepts_integer_temperature() {
    let event = decode_event(&json!({
        "type": "sample",
        "stationName": "A",
        "timestamp": 0,
        "temperature": -4
    }))
    .unwrap();
    assert_eq!(event, Event::sample("A", 0, -4.0));
}

#[test]
fn test_decode_sample_ignores_extra_fields() {
    let event = decode_event(&json!({
        "type": "sample",
        "stationName": "A",
        "timestamp": 10,
        "temperature": 1.5,
        "humidity": 80
    }))
    .unwrap();
    assert_eq!(event, Event::sample("A", 10, 1.5));
}

#[test]
fn test_decode_control_commands() {
    assert_eq!(
        decode_event(&snapshot()).unwrap(),
        Event::Control(ControlCommand::Snapshot)
    );
    assert_eq!(
        decode_event(&reset()).unwrap(),
        Event::Control(ControlCommand::Reset)
    );
}

#[test]
fn test_missing_sample_fields() {
    let error = decode_event(&json!({"type": "sample", "stationName": FOSTER})).unwrap_err();
    assert!(matches!(error, Error::MissingField { field: "timestamp", .. }));
    assert!(
        error
            .to_string()
            .starts_with("Please verify input. Weather sample missing required fields")
    );

    let error = decode_event(&json!({"type": "sample", "timestamp": 1, "temperature": 1.0}))
        .unwrap_err();
    assert!(matches!(error, Error::MissingField { field: "stationName", .. }));

    let error = decode_event(&json!({"type": "sample", "stationName": "A", "timestamp": 1}))
        .unwrap_err();
    assert!(matches!(error, Error::MissingField { field: "temperature", .. }));
}

#[test]
fn test_null_sample_field_is_missing() {
    let error = decode_event(&json!({
        "type": "sample",
        "stationName": "A",
        "timestamp": 1,
        "temperature": null
    }))
    .unwrap_err();
    assert!(matches!(error, Error::MissingField { field: "temperature", .. }));
}

#[test]
fn test_wrong_kind_sample_fields() {
    let non_numeric = decode_event(&json!({
        "type": "sample",
        "stationName": "A",
        "timestamp": 1,
        "temperature": "hot"
    }))
    .unwrap_err();
    assert!(matches!(non_numeric, Error::MissingField { field: "temperature", .. }));
    assert!(non_numeric.to_string().contains("must be a number, found string"));

    let fractional_timestamp = decode_event(&json!({
        "type": "sample",
        "stationName": "A",
        "timestamp": 1.5,
        "temperature": 1.0
    }))
    .unwrap_err();
    assert!(matches!(fractional_timestamp, Error::MissingField { field: "timestamp", .. }));

    let numeric_name = decode_event(&json!({
        "type": "sample",
        "stationName": 7,
        "timestamp": 1,
        "temperature": 1.0
    }))
    .unwrap_err();
    assert!(matches!(numeric_name, Error::MissingField { field: "stationName", .. }));
}

#[test]
fn test_empty_station_name_rejected() {
    let error = decode_event(&sample("", 1, 1.0)).unwrap_err();
    assert!(matches!(error, Error::MissingField { field: "stationName", .. }));
}

#[test]
fn test_out_of_range_timestamp_rejected() {
    let error = decode_event(&json!({
        "type": "sample",
        "stationName": "A",
        "timestamp": u64::MAX,
        "temperature": 1.0
    }))
    .unwrap_err();
    assert!(error.to_string().contains("integer out of range"));
}

#[test]
fn test_unknown_message_type() {
    let error = decode_event(&json!({"type": "unknown", "data": "some data"})).unwrap_err();
    assert!(matches!(
        &error,
        Error::UnknownMessageType { message_type: Some(t) } if t == "unknown"
    ));
    assert_eq!(
        error.to_string(),
        "Please verify input. Unknown message type: 'unknown'"
    );
}

#[test]
fn test_missing_or_non_string_type_is_unknown() {
    for value in [json!({"stationName": "A"}), json!({"type": 3}), json!([1, 2]), json!(null)] {
        let error = decode_event(&value).unwrap_err();
        assert!(matches!(error, Error::UnknownMessageType { message_type: None }));
    }
}

#[test]
fn test_unknown_control_command() {
    let error = decode_event(&control("unknown_command")).unwrap_err();
    assert!(matches!(
        &error,
        Error::UnknownCommand { command: Some(c) } if c == "unknown_command"
    ));
    assert_eq!(
        error.to_string(),
        "Please verify input. Unknown control command: 'unknown_command'"
    );

    let missing = decode_event(&json!({"type": "control"})).unwrap_err();
    assert!(matches!(missing, Error::UnknownCommand { command: None }));
}

#[test]
fn test_validation_errors_are_classified() {
    assert!(decode_event(&control("flush")).unwrap_err().is_validation());
    assert!(decode_event(&json!({"type": "bogus"})).unwrap_err().is_validation());
    assert!(!Error::configuration("bad").is_validation());
}
