//! Status line parser
//!
//! One record per line, as appended by the acquisition script:
//!
//! ```text
//! 2024-06-01 10:00:00 - TEMP:23||HUM:41||...||UPS:230_229_1200_50_50_31||IPDU:1_2_3_4
//! ```
//!
//! - The timestamp ends at the first `" - "`
//! - Pairs are separated by `"||"`
//! - Key and value are split on the first `":"`, so values may contain colons
//! - `UPS` and `IPDU` carry `_`-separated sub-values

use super::types::{Parseable, RecordFields, Snapshot};
use crate::error::{Result, TelemetryError};

/// Separates the timestamp prefix from the payload
pub const RECORD_SEPARATOR: &str = " - ";

/// Separates key-value pairs in the payload
pub const PAIR_DELIMITER: &str = "||";

/// Separates a key from its value
pub const KEY_VALUE_DELIMITER: char = ':';

/// Separates the sub-values of a composite field
pub const COMPOSITE_DELIMITER: &str = "_";

/// Split a raw line into its timestamp and key-value pairs.
///
/// No schema is applied: any key is accepted, and a repeated key keeps the
/// value of its last occurrence.
pub fn parse_fields(line: &str) -> Result<RecordFields> {
    let (timestamp, payload) = line.split_once(RECORD_SEPARATOR).ok_or_else(|| {
        TelemetryError::malformed(format!("missing '{}' separator", RECORD_SEPARATOR.trim()))
    })?;

    let mut fields = RecordFields {
        timestamp: timestamp.trim().to_string(),
        ..Default::default()
    };

    for (index, pair) in payload.split(PAIR_DELIMITER).enumerate() {
        let (key, value) = pair.split_once(KEY_VALUE_DELIMITER).ok_or_else(|| {
            TelemetryError::malformed(format!(
                "pair {} ('{}') has no '{}'",
                index + 1,
                pair.trim(),
                KEY_VALUE_DELIMITER
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(TelemetryError::malformed(format!(
                "pair {} has an empty key",
                index + 1
            )));
        }

        if let Some(previous) = fields
            .values
            .insert(key.to_string(), value.trim().to_string())
        {
            tracing::debug!("Duplicate key {} replaces value '{}'", key, previous);
        }
    }

    Ok(fields)
}

/// Status line parser
pub struct StatusLine;

impl Parseable for StatusLine {
    fn parse(&self, line: &str) -> Result<Snapshot> {
        let fields = parse_fields(line)?;
        tracing::debug!(
            "Parsed {} fields from record at {}",
            fields.len(),
            fields.timestamp
        );
        Snapshot::from_fields(fields)
    }
}
