use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::status_line::COMPOSITE_DELIMITER;
use crate::error::{Result, TelemetryError};

/// Timestamp layout written in front of every record
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of UPS sub-values in a record
pub const UPS_ARITY: usize = 6;

/// Number of IPDU sub-values in a record
pub const IPDU_ARITY: usize = 4;

/// Number of digital input channels (IN1STATUS..IN7STATUS)
pub const INPUT_COUNT: usize = 7;

/// Known record fields, named as they appear on the wire
#[derive(Clone, Copy, Debug, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq, Hash)]
pub enum Field {
    #[strum(serialize = "TEMP")]
    Temp,
    #[strum(serialize = "HUM")]
    Hum,
    #[strum(serialize = "FIRESTATUS")]
    FireStatus,
    #[strum(serialize = "WLDSTATUS")]
    WldStatus,
    #[strum(serialize = "SMOKESTATUS")]
    SmokeStatus,
    #[strum(serialize = "IN1STATUS")]
    In1Status,
    #[strum(serialize = "IN2STATUS")]
    In2Status,
    #[strum(serialize = "IN3STATUS")]
    In3Status,
    #[strum(serialize = "IN4STATUS")]
    In4Status,
    #[strum(serialize = "IN5STATUS")]
    In5Status,
    #[strum(serialize = "IN6STATUS")]
    In6Status,
    #[strum(serialize = "IN7STATUS")]
    In7Status,
    #[strum(serialize = "UPS")]
    Ups,
    #[strum(serialize = "IPDU")]
    Ipdu,
}

impl Field {
    /// The digital input fields in channel order
    pub const INPUTS: [Field; INPUT_COUNT] = [
        Field::In1Status,
        Field::In2Status,
        Field::In3Status,
        Field::In4Status,
        Field::In5Status,
        Field::In6Status,
        Field::In7Status,
    ];

    /// Wire name of the field
    pub fn key(&self) -> &'static str {
        (*self).into()
    }

    /// Human readable label for dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Field::Temp => "Temperature",
            Field::Hum => "Humidity",
            Field::FireStatus => "Fire Alarm",
            Field::WldStatus => "Water Leak Detector",
            Field::SmokeStatus => "Smoke Status",
            Field::Ups => "UPS",
            Field::Ipdu => "IPDU",
            // Inputs are shown under their wire names
            _ => self.key(),
        }
    }

    /// Display unit, empty for status fields
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Temp => "°C",
            Field::Hum => "%",
            _ => "",
        }
    }

    /// Expected number of `_`-separated sub-values, if composite
    pub fn arity(&self) -> Option<usize> {
        match self {
            Field::Ups => Some(UPS_ARITY),
            Field::Ipdu => Some(IPDU_ARITY),
            _ => None,
        }
    }
}

/// Key-value content of one record, before any schema is applied
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordFields {
    /// Everything in front of the first " - " separator, trimmed
    pub timestamp: String,
    /// Trimmed values keyed by trimmed field name; later duplicates win
    pub values: BTreeMap<String, String>,
}

impl RecordFields {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split a composite value into exactly `N` trimmed sub-values.
///
/// Fewer than `N` parts is rejected; parts beyond `N` are dropped.
fn split_composite<const N: usize>(field: Field, value: &str) -> Result<[String; N]> {
    let mut parts: Vec<String> = value
        .split(COMPOSITE_DELIMITER)
        .map(|p| p.trim().to_string())
        .collect();

    if parts.len() < N {
        return Err(TelemetryError::malformed(format!(
            "{} has {} sub-values, expected {}",
            field.key(),
            parts.len(),
            N
        )));
    }
    if parts.len() > N {
        tracing::debug!(
            "Ignoring {} extra {} sub-values",
            parts.len() - N,
            field.key()
        );
        parts.truncate(N);
    }

    parts.try_into().map_err(|_: Vec<String>| {
        TelemetryError::malformed(format!("{} could not be split", field.key()))
    })
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// UPS readings in their fixed positional order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UpsReadings([String; UPS_ARITY]);

impl UpsReadings {
    /// Card labels and units for each position
    pub const LABELS: [(&'static str, &'static str); UPS_ARITY] = [
        ("UPS Input Voltage", "V"),
        ("UPS Output Voltage", "V"),
        ("UPS Run Time Remaining", "ms"),
        ("UPS Input Frequency", "Hz"),
        ("UPS Output Frequency", "Hz"),
        ("UPS Internal Temperature", "°C"),
    ];

    pub fn parse(value: &str) -> Result<Self> {
        split_composite(Field::Ups, value).map(Self)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn input_voltage(&self) -> &str {
        &self.0[0]
    }

    pub fn output_voltage(&self) -> &str {
        &self.0[1]
    }

    pub fn run_time_remaining(&self) -> &str {
        &self.0[2]
    }

    pub fn input_frequency(&self) -> &str {
        &self.0[3]
    }

    pub fn output_frequency(&self) -> &str {
        &self.0[4]
    }

    pub fn internal_temperature(&self) -> &str {
        &self.0[5]
    }
}

/// IPDU readings in their fixed positional order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IpduReadings([String; IPDU_ARITY]);

impl IpduReadings {
    pub fn parse(value: &str) -> Result<Self> {
        split_composite(Field::Ipdu, value).map(Self)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Structured form of one telemetry record
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub temperature: String,
    pub humidity: String,
    pub fire_status: String,
    pub water_leak_status: String,
    pub smoke_status: String,
    /// IN1STATUS..IN7STATUS
    pub inputs: [String; INPUT_COUNT],
    pub ups: UpsReadings,
    pub ipdu: IpduReadings,
}

impl Snapshot {
    /// Apply the record schema to raw fields.
    ///
    /// Unknown keys and missing known keys are both rejected.
    pub fn from_fields(fields: RecordFields) -> Result<Self> {
        if fields.is_empty() {
            return Err(TelemetryError::malformed("record has no fields"));
        }

        if let Some(unknown) = fields.values.keys().find(|k| Field::from_str(k).is_err()) {
            return Err(TelemetryError::malformed(format!(
                "unknown field '{}'",
                unknown
            )));
        }

        let missing: Vec<&str> = Field::iter()
            .filter(|f| !fields.values.contains_key(f.key()))
            .map(|f| f.key())
            .collect();
        if !missing.is_empty() {
            return Err(TelemetryError::malformed(format!(
                "missing field(s): {}",
                missing.join(", ")
            )));
        }

        let RecordFields {
            timestamp,
            mut values,
        } = fields;
        let mut take = |field: Field| values.remove(field.key()).unwrap_or_default();

        let temperature = take(Field::Temp);
        let humidity = take(Field::Hum);
        let fire_status = take(Field::FireStatus);
        let water_leak_status = take(Field::WldStatus);
        let smoke_status = take(Field::SmokeStatus);
        let inputs = Field::INPUTS.map(&mut take);
        let ups = UpsReadings::parse(&take(Field::Ups))?;
        let ipdu = IpduReadings::parse(&take(Field::Ipdu))?;

        Ok(Snapshot {
            timestamp,
            temperature,
            humidity,
            fire_status,
            water_leak_status,
            smoke_status,
            inputs,
            ups,
            ipdu,
        })
    }

    /// Scalar value by field, `None` for composite fields
    pub fn scalar(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Temp => &self.temperature,
            Field::Hum => &self.humidity,
            Field::FireStatus => &self.fire_status,
            Field::WldStatus => &self.water_leak_status,
            Field::SmokeStatus => &self.smoke_status,
            Field::Ups | Field::Ipdu => return None,
            input => {
                let index = Field::INPUTS.iter().position(|f| *f == input)?;
                &self.inputs[index]
            }
        };
        Some(value.as_str())
    }

    /// Status of digital input `channel` (1-based)
    pub fn input(&self, channel: usize) -> Option<&str> {
        channel
            .checked_sub(1)
            .and_then(|i| self.inputs.get(i))
            .map(String::as_str)
    }

    pub fn temperature_celsius(&self) -> Option<f64> {
        parse_number(&self.temperature)
    }

    pub fn humidity_percent(&self) -> Option<f64> {
        parse_number(&self.humidity)
    }

    /// Timestamp prefix as a date-time, if it follows [`TIMESTAMP_FORMAT`]
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Trait for record parsers
pub trait Parseable {
    fn parse(&self, line: &str) -> Result<Snapshot>;
}
