//! Tests for the structured snapshot produced from a record line

use crate::common::assertions::*;
use crate::common::{record_with, record_without, COMPLETE_RECORD};
use roomwatch::parsers::types::Field;
use roomwatch::{Parseable, StatusLine};
use strum::IntoEnumIterator;

#[test]
fn test_parse_complete_record() {
    let snapshot = StatusLine.parse(COMPLETE_RECORD).expect("Should parse");

    assert_eq!(snapshot.temperature, "23.5");
    assert_eq!(snapshot.humidity, "41");
    assert_eq!(snapshot.fire_status, "0");
    assert_eq!(snapshot.water_leak_status, "0");
    assert_eq!(snapshot.smoke_status, "0");
    assert_eq!(
        snapshot.inputs,
        ["1", "0", "0", "0", "0", "0", "1"].map(String::from)
    );
    assert_eq!(snapshot.temperature_celsius(), Some(23.5));
    assert!(snapshot.recorded_at().is_some());
}

#[test]
fn test_ups_positions() {
    let snapshot = StatusLine
        .parse(&record_with("UPS", "1_2_3_4_5_6"))
        .expect("Should parse");

    assert_eq!(snapshot.ups.as_slice(), ["1", "2", "3", "4", "5", "6"]);
    assert_eq!(snapshot.ups.input_voltage(), "1");
    assert_eq!(snapshot.ups.output_voltage(), "2");
    assert_eq!(snapshot.ups.run_time_remaining(), "3");
    assert_eq!(snapshot.ups.input_frequency(), "4");
    assert_eq!(snapshot.ups.output_frequency(), "5");
    assert_eq!(snapshot.ups.internal_temperature(), "6");
}

#[test]
fn test_short_composites_rejected() {
    assert_malformed(StatusLine.parse(&record_with("UPS", "1_2_3_4_5")));
    assert_malformed(StatusLine.parse(&record_with("IPDU", "1_2_3")));
    assert_malformed(StatusLine.parse(&record_with("IPDU", "")));
}

#[test]
fn test_every_field_is_required() {
    for field in Field::iter() {
        assert_malformed(StatusLine.parse(&record_without(field.key())));
    }
}

#[test]
fn test_unknown_field_rejected() {
    let line = format!("{}||MAC:00:11:22:33:44:55", COMPLETE_RECORD);
    assert_malformed(StatusLine.parse(&line));
}

#[test]
fn test_duplicate_key_last_wins_in_snapshot() {
    let line = format!("{}||TEMP:19", COMPLETE_RECORD);
    let snapshot = StatusLine.parse(&line).expect("Should parse");
    assert_eq!(snapshot.temperature, "19");
}

#[test]
fn test_parsing_is_deterministic() {
    let first = StatusLine.parse(COMPLETE_RECORD).expect("Should parse");
    let second = StatusLine.parse(COMPLETE_RECORD).expect("Should parse");
    assert_eq!(first, second);
}
