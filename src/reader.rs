//! Newest-record lookup for append-only telemetry logs.
//!
//! Records are appended one per line, so the newest record is the last line
//! that carries any content. Blank lines (including whitespace-only lines)
//! are skipped and line terminators are stripped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TelemetryError};

fn strip_terminators(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\r' | b'\n'] = line {
        line = rest;
    }
    line
}

/// Return the last non-blank line of `source`.
///
/// Lines are scanned as bytes and only the newest one is decoded, so
/// damaged history does not hide a valid newest record.
pub fn last_record<R: BufRead>(mut source: R) -> Result<String> {
    let mut buf = Vec::new();
    let mut newest: Option<Vec<u8>> = None;

    loop {
        buf.clear();
        if source.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = strip_terminators(&buf);
        // Invalid bytes become U+FFFD, which is not whitespace
        if !String::from_utf8_lossy(line).trim().is_empty() {
            newest = Some(line.to_vec());
        }
    }

    let newest = newest.ok_or(TelemetryError::EmptySource)?;
    String::from_utf8(newest)
        .map_err(|_| TelemetryError::malformed("newest record is not valid UTF-8"))
}

/// Open the log at `path` and return its newest record.
pub fn read_last_record(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let record = last_record(BufReader::new(file))?;

    tracing::debug!("Read newest record from {}", path.display());
    Ok(record)
}
