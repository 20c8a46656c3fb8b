//! Record writer for the acquisition side of the log.
//!
//! Each poll produces one line: the sensor detail string from the
//! controller, followed by the UPS and IPDU readings joined with `_`.
//! Readings that could not be fetched are written as `0` so the composite
//! arity stays fixed.

use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, TelemetryError};
use crate::parsers::status_line::{COMPOSITE_DELIMITER, PAIR_DELIMITER, RECORD_SEPARATOR};
use crate::parsers::types::TIMESTAMP_FORMAT;

/// Placeholder written for a reading that could not be fetched
pub const MISSING_READING: &str = "0";

fn has_line_break(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

/// Fit raw readings to `arity`: blanks become missing, short lists are
/// padded with missing readings and extra readings are dropped.
pub fn fit_readings(values: Vec<String>, arity: usize) -> Vec<Option<String>> {
    if values.len() > arity {
        tracing::warn!(
            "Dropping {} reading(s) beyond the expected {}",
            values.len() - arity,
            arity
        );
    }

    let mut readings: Vec<Option<String>> = values
        .into_iter()
        .take(arity)
        .map(|v| Some(v.trim().to_string()).filter(|v| !v.is_empty()))
        .collect();
    readings.resize(arity, None);
    readings
}

/// Join composite readings with `_`, substituting [`MISSING_READING`].
///
/// A reading containing the composite delimiter, the pair delimiter or a
/// line break would change the record structure and is rejected.
pub fn join_composite(readings: &[Option<String>]) -> Result<String> {
    let mut parts = Vec::with_capacity(readings.len());

    for (index, reading) in readings.iter().enumerate() {
        let value = reading.as_deref().unwrap_or(MISSING_READING);
        if value.contains(COMPOSITE_DELIMITER)
            || value.contains(PAIR_DELIMITER)
            || has_line_break(value)
        {
            return Err(TelemetryError::malformed(format!(
                "reading {} ('{}') contains a reserved delimiter",
                index + 1,
                value.escape_debug()
            )));
        }
        parts.push(value);
    }

    Ok(parts.join(COMPOSITE_DELIMITER))
}

/// Append the UPS and IPDU pairs to a controller detail string.
pub fn compose_detail(
    detail: &str,
    ups: &[Option<String>],
    ipdu: &[Option<String>],
) -> Result<String> {
    Ok(format!(
        "{detail}{sep}UPS:{}{sep}IPDU:{}",
        join_composite(ups)?,
        join_composite(ipdu)?,
        sep = PAIR_DELIMITER
    ))
}

/// Prefix `detail` with a formatted timestamp.
pub fn format_record(timestamp: NaiveDateTime, detail: &str) -> String {
    format!(
        "{}{}{}",
        timestamp.format(TIMESTAMP_FORMAT),
        RECORD_SEPARATOR,
        detail
    )
}

/// Append one record line to the log at `path`, creating it if needed.
///
/// The record must be a single line; the log is left untouched otherwise.
pub fn append_record(path: &Path, record: &str) -> Result<()> {
    if has_line_break(record) {
        return Err(TelemetryError::malformed("record contains a line break"));
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", record)?;

    tracing::info!("Appended record to {}", path.display());
    Ok(())
}
