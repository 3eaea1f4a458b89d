//! Period accumulators and the report lines they produce.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::timestamp::{same_day, same_month, same_week, same_year};

/// Distance (in odometer units) that must be exceeded before a period with
/// no charge activity is reported.
pub const DISTANCE_NOISE_THRESHOLD: f64 = 1.0;

/// A period length tracked by the aggregator, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// All granularities in the order their boundaries are checked.
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Whether `timestamp` falls in the period that contains `anchor`.
    pub fn contains(self, anchor: &NaiveDateTime, timestamp: &NaiveDateTime) -> bool {
        match self {
            Self::Day => same_day(anchor, timestamp),
            Self::Week => same_week(anchor, timestamp),
            Self::Month => same_month(anchor, timestamp),
            Self::Year => same_year(anchor, timestamp),
        }
    }

    /// Report label for the period anchored at `anchor`.
    pub fn label(self, anchor: &NaiveDateTime) -> String {
        match self {
            Self::Day => format!("DAY   {}", anchor.format("%Y-%m-%d")),
            Self::Week => format!("WEEK  {} W{}", anchor.year(), anchor.iso_week().week()),
            Self::Month => format!("MONTH {}", anchor.format("%Y-%m")),
            Self::Year => format!("YEAR  {}", anchor.year()),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

/// Running totals for one open period.
///
/// `charged` only ever grows and `discharged` only ever shrinks, so a period
/// that charged 10% and then used 10% still shows both movements.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAccumulator {
    /// Timestamp of the first record in the period.
    pub anchor: NaiveDateTime,
    /// Odometer reading of the first record in the period.
    pub anchor_odometer: f64,
    /// Sum of positive state-of-charge steps, in percent.
    pub charged: i32,
    /// Sum of negative state-of-charge steps, in percent.
    pub discharged: i32,
}

impl PeriodAccumulator {
    /// Opens a period at the given record position with zeroed counters.
    pub const fn start(anchor: NaiveDateTime, anchor_odometer: f64) -> Self {
        Self {
            anchor,
            anchor_odometer,
            charged: 0,
            discharged: 0,
        }
    }

    /// Folds one state-of-charge step into the counters.
    pub const fn fold(&mut self, delta_soc: i32) {
        if delta_soc > 0 {
            self.charged += delta_soc;
        } else if delta_soc < 0 {
            self.discharged += delta_soc;
        }
    }

    /// Closes the period at `odometer`.
    ///
    /// Returns `None` when nothing worth reporting happened: no charging, no
    /// discharging and no more than [`DISTANCE_NOISE_THRESHOLD`] driven.
    pub fn close(&self, granularity: Granularity, odometer: f64) -> Option<PeriodReport> {
        let distance = odometer - self.anchor_odometer;
        if self.charged > 0 || self.discharged < 0 || distance > DISTANCE_NOISE_THRESHOLD {
            Some(PeriodReport {
                granularity,
                label: granularity.label(&self.anchor),
                distance,
                charged: self.charged,
                discharged: self.discharged,
            })
        } else {
            None
        }
    }
}

/// Summary of one closed period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub granularity: Granularity,
    pub label: String,
    /// Distance driven, unrounded. Display rounds it to one decimal.
    pub distance: f64,
    pub charged: i32,
    pub discharged: i32,
}

impl fmt::Display for PeriodReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:17} driven: {:5.1} charged: {:+4}% discharged: {:4}%",
            self.label, self.distance, self.charged, self.discharged
        )
    }
}
