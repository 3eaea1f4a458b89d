//! Telemetry records parsed from `monitor.csv` lines.

use std::str::FromStr;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::timestamp::{DateParseError, parse_timestamp};

/// Column positions of a monitor line.
mod column {
    pub const TIMESTAMP: usize = 0;
    pub const LONGITUDE: usize = 1;
    pub const LATITUDE: usize = 2;
    pub const ENGINE_ON: usize = 3;
    pub const BATTERY_12V: usize = 4;
    pub const ODOMETER: usize = 5;
    pub const STATE_OF_CHARGE: usize = 6;
    pub const CHARGING: usize = 7;
    pub const PLUGGED: usize = 8;
}

/// Errors from parsing a monitor line.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The line has fewer columns than required.
    #[error("missing {field} column")]
    MissingField { field: &'static str },

    /// The timestamp column could not be parsed.
    #[error("invalid timestamp")]
    Timestamp(#[from] DateParseError),

    /// The odometer column is not a number.
    #[error("invalid odometer: {value:?}")]
    InvalidOdometer { value: String },

    /// The state-of-charge column is not a whole percentage from 0 to 100.
    #[error("invalid state of charge: {value:?}")]
    InvalidStateOfCharge { value: String },
}

/// One line of the monitor log.
///
/// Only `timestamp`, `odometer` and `state_of_charge` are interpreted. The
/// remaining columns are kept as trimmed text for other tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    pub timestamp: NaiveDateTime,
    pub longitude: String,
    pub latitude: String,
    pub engine_on: String,
    pub battery_12v: String,
    pub odometer: f64,
    /// State of charge in percent (0-100).
    pub state_of_charge: i32,
    pub charging: String,
    pub plugged: String,
}

impl TelemetryRecord {
    /// Returns a copy of this record with a different timestamp.
    #[must_use]
    pub fn with_timestamp(&self, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }
}

impl FromStr for TelemetryRecord {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let required = |index: usize, field: &'static str| {
            fields
                .get(index)
                .copied()
                .ok_or(ParseError::MissingField { field })
        };
        let optional = |index: usize| fields.get(index).copied().unwrap_or_default().to_string();

        let timestamp = parse_timestamp(required(column::TIMESTAMP, "timestamp")?)?;
        let odometer = parse_odometer(required(column::ODOMETER, "odometer")?)?;
        let state_of_charge =
            parse_state_of_charge(required(column::STATE_OF_CHARGE, "state of charge")?)?;

        Ok(Self {
            timestamp,
            longitude: optional(column::LONGITUDE),
            latitude: optional(column::LATITUDE),
            engine_on: optional(column::ENGINE_ON),
            battery_12v: optional(column::BATTERY_12V),
            odometer,
            state_of_charge,
            charging: optional(column::CHARGING),
            plugged: optional(column::PLUGGED),
        })
    }
}

fn parse_odometer(value: &str) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|odometer| odometer.is_finite())
        .ok_or_else(|| ParseError::InvalidOdometer {
            value: value.to_string(),
        })
}

const STATE_OF_CHARGE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Accepts `80` as well as `80.0`; a fractional percentage or a value
/// outside 0-100 is rejected.
#[allow(clippy::cast_possible_truncation)]
fn parse_state_of_charge(value: &str) -> Result<i32, ParseError> {
    value
        .parse::<i32>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|soc| soc.fract() == 0.0 && STATE_OF_CHARGE_RANGE.contains(soc))
                .map(|soc| soc as i32)
        })
        .filter(|soc| (0..=100).contains(soc))
        .ok_or_else(|| ParseError::InvalidStateOfCharge {
            value: value.to_string(),
        })
}
