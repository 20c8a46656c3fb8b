//! Records composed by the writer and read back by the reader and parser

use crate::common::assertions::*;
use crate::common::{temp_log, COMPLETE_RECORD};
use chrono::NaiveDate;
use roomwatch::writer::{append_record, compose_detail, format_record};
use roomwatch::{load_snapshot, Parseable, StatusLine};

const DETAIL: &str = "TEMP:24||HUM:40||FIRESTATUS:0||WLDSTATUS:1||SMOKESTATUS:0||\
IN1STATUS:0||IN2STATUS:0||IN3STATUS:0||IN4STATUS:0||IN5STATUS:0||IN6STATUS:0||IN7STATUS:0";

fn some(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

#[test]
fn test_written_record_parses() {
    let at = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let ups = some(&["231", "230", "900", "50", "50", "29"]);
    let ipdu = vec![Some("3.2".to_string()), None, None, Some("7".to_string())];

    let detail = compose_detail(DETAIL, &ups, &ipdu).expect("Should compose");
    let record = format_record(at, &detail);
    let snapshot = StatusLine.parse(&record).expect("Should parse");

    assert_eq!(snapshot.recorded_at(), Some(at));
    assert_eq!(snapshot.water_leak_status, "1");
    assert_eq!(snapshot.ups.internal_temperature(), "29");
    assert_eq!(snapshot.ipdu.as_slice(), ["3.2", "0", "0", "7"]);
}

#[test]
fn test_appended_record_becomes_newest() {
    let log = temp_log("");
    let at = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let ups = vec![None; 6];
    let ipdu = vec![None; 4];

    for temp in ["20", "21", "22"] {
        let detail = DETAIL.replace("TEMP:24", &format!("TEMP:{}", temp));
        let record = format_record(
            at,
            &compose_detail(&detail, &ups, &ipdu).expect("Should compose"),
        );
        append_record(&log.path, &record).expect("Should append");
    }

    let snapshot = load_snapshot(&log.path).expect("Should load");
    assert_eq!(snapshot.temperature, "22");
    assert_eq!(snapshot.ups.as_slice(), ["0"; 6]);
}

#[test]
fn test_reading_with_delimiter_is_not_written() {
    let ups = some(&["230_1", "229", "900", "50", "50", "29"]);
    let ipdu = vec![None; 4];
    assert_malformed(compose_detail(DETAIL, &ups, &ipdu));
}

#[test]
fn test_multi_line_record_leaves_log_readable() {
    let log = temp_log(&format!("{}\n", COMPLETE_RECORD));
    let at = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let ups = vec![None; 6];
    let ipdu = vec![None; 4];

    let detail =
        compose_detail(&format!("{}\nX", DETAIL), &ups, &ipdu).expect("Should compose");
    assert_malformed(append_record(&log.path, &format_record(at, &detail)));

    let snapshot = load_snapshot(&log.path).expect("Should load");
    assert_eq!(snapshot.temperature, "23.5");
}
