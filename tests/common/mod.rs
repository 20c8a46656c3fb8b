//! Common test utilities shared across all test modules
//!
//! This module provides record fixtures, temporary log files, and assertion
//! helpers used by the parser and integration suites.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// A complete, well-formed record line
pub const COMPLETE_RECORD: &str = "2024-06-01 10:00:00 - TEMP:23.5||HUM:41||FIRESTATUS:0||\
WLDSTATUS:0||SMOKESTATUS:0||IN1STATUS:1||IN2STATUS:0||IN3STATUS:0||IN4STATUS:0||\
IN5STATUS:0||IN6STATUS:0||IN7STATUS:1||UPS:230_229_1200_50_50_31||IPDU:1_2_3_4";

/// Rebuild the complete record with its pairs passed through `f`
fn map_pairs(f: impl Fn(&str) -> Option<String>) -> String {
    let (timestamp, payload) = COMPLETE_RECORD.split_once(" - ").unwrap();
    let pairs: Vec<String> = payload.split("||").filter_map(f).collect();
    format!("{} - {}", timestamp, pairs.join("||"))
}

/// Build a complete record with `key` set to `value`
pub fn record_with(key: &str, value: &str) -> String {
    let prefix = format!("{}:", key);
    map_pairs(|pair| {
        if pair.starts_with(&prefix) {
            Some(format!("{}{}", prefix, value))
        } else {
            Some(pair.to_string())
        }
    })
}

/// Build a complete record without `key`
pub fn record_without(key: &str) -> String {
    let prefix = format!("{}:", key);
    map_pairs(|pair| (!pair.starts_with(&prefix)).then(|| pair.to_string()))
}

/// A log file inside a temporary directory that is removed on drop
pub struct TempLog {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Write `contents` to a fresh temporary log file
pub fn temp_log(contents: &str) -> TempLog {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.txt");
    std::fs::write(&path, contents).expect("Failed to write temp log");
    TempLog { dir, path }
}

/// Assertion helpers for common test patterns
pub mod assertions {
    use roomwatch::TelemetryError;

    /// Assert that a result failed with `MalformedRecord`
    pub fn assert_malformed<T: std::fmt::Debug>(result: Result<T, TelemetryError>) {
        match result {
            Err(TelemetryError::MalformedRecord(_)) => {}
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    /// Assert that a result failed with `EmptySource`
    pub fn assert_empty_source<T: std::fmt::Debug>(result: Result<T, TelemetryError>) {
        match result {
            Err(TelemetryError::EmptySource) => {}
            other => panic!("Expected EmptySource, got {:?}", other),
        }
    }
}
