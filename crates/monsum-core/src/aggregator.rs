//! Streaming aggregation of telemetry records into day, week, month and year
//! periods.
//!
//! The aggregator keeps one open [`PeriodAccumulator`] per [`Granularity`].
//! Each record's state-of-charge step is folded into all four, then the day
//! boundary is checked. Only when the day rolls over are the week, month and
//! year boundaries checked, in that order. A closed week, month or year is
//! replaced by a copy of the freshly opened day, so every period starts at
//! the first record of a day.

use chrono::{Datelike, NaiveDateTime};

use crate::period::{Granularity, PeriodAccumulator, PeriodReport};
use crate::record::TelemetryRecord;

/// Year given to the sentinel record that closes all open periods.
pub const SENTINEL_YEAR: i32 = 2999;

/// The four open periods.
#[derive(Debug, Clone, PartialEq)]
struct OpenPeriods {
    day: PeriodAccumulator,
    week: PeriodAccumulator,
    month: PeriodAccumulator,
    year: PeriodAccumulator,
}

impl OpenPeriods {
    fn start(record: &TelemetryRecord) -> Self {
        let day = PeriodAccumulator::start(record.timestamp, record.odometer);
        Self {
            week: day.clone(),
            month: day.clone(),
            year: day.clone(),
            day,
        }
    }

    const fn get(&self, granularity: Granularity) -> &PeriodAccumulator {
        match granularity {
            Granularity::Day => &self.day,
            Granularity::Week => &self.week,
            Granularity::Month => &self.month,
            Granularity::Year => &self.year,
        }
    }

    const fn get_mut(&mut self, granularity: Granularity) -> &mut PeriodAccumulator {
        match granularity {
            Granularity::Day => &mut self.day,
            Granularity::Week => &mut self.week,
            Granularity::Month => &mut self.month,
            Granularity::Year => &mut self.year,
        }
    }
}

/// Folds a stream of records into period reports.
#[derive(Debug, Default)]
pub struct PeriodAggregator {
    periods: Option<OpenPeriods>,
    previous: Option<TelemetryRecord>,
    records_ingested: usize,
}

impl PeriodAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open accumulator for `granularity`, if any record was ingested.
    pub fn accumulator(&self, granularity: Granularity) -> Option<&PeriodAccumulator> {
        self.periods.as_ref().map(|periods| periods.get(granularity))
    }

    /// Number of records passed to [`Self::ingest`], excluding the sentinel.
    pub const fn records_ingested(&self) -> usize {
        self.records_ingested
    }

    /// Ingests one record and returns the reports for every period it closed,
    /// in day, week, month, year order.
    pub fn ingest(&mut self, record: TelemetryRecord) -> Vec<PeriodReport> {
        self.records_ingested += 1;
        self.step(record)
    }

    /// Closes every open period by ingesting a sentinel copy of the last
    /// record moved to [`SENTINEL_YEAR`].
    ///
    /// Does nothing if no record was ever ingested.
    pub fn finish(&mut self) -> Vec<PeriodReport> {
        let Some(last) = self.previous.as_ref() else {
            tracing::debug!("no records ingested, nothing to flush");
            return Vec::new();
        };
        let Some(timestamp) = sentinel_timestamp(&last.timestamp) else {
            tracing::warn!(timestamp = %last.timestamp, "cannot build sentinel timestamp");
            return Vec::new();
        };
        tracing::debug!(%timestamp, "flushing open periods");
        let sentinel = last.with_timestamp(timestamp);
        self.step(sentinel)
    }

    fn step(&mut self, record: TelemetryRecord) -> Vec<PeriodReport> {
        let Some(periods) = self.periods.as_mut() else {
            tracing::debug!(timestamp = %record.timestamp, odometer = record.odometer, "opening first periods");
            self.periods = Some(OpenPeriods::start(&record));
            self.previous = Some(record);
            return Vec::new();
        };

        let previous_soc = self
            .previous
            .as_ref()
            .map_or(record.state_of_charge, |prev| prev.state_of_charge);
        let delta_soc = record.state_of_charge - previous_soc;
        if delta_soc != 0 {
            tracing::debug!(delta_soc, "state of charge changed");
            for granularity in Granularity::ALL {
                periods.get_mut(granularity).fold(delta_soc);
            }
        }

        let mut reports = Vec::new();
        if !Granularity::Day.contains(&periods.day.anchor, &record.timestamp) {
            reports.extend(close(periods, Granularity::Day, &record));
            periods.day = PeriodAccumulator::start(record.timestamp, record.odometer);

            for granularity in [Granularity::Week, Granularity::Month, Granularity::Year] {
                if !granularity.contains(&periods.get(granularity).anchor, &record.timestamp) {
                    reports.extend(close(periods, granularity, &record));
                    let successor = periods.day.clone();
                    *periods.get_mut(granularity) = successor;
                }
            }
        }

        self.previous = Some(record);
        reports
    }
}

fn close(
    periods: &OpenPeriods,
    granularity: Granularity,
    current: &TelemetryRecord,
) -> Option<PeriodReport> {
    let closing = periods.get(granularity);
    tracing::debug!(
        %granularity,
        anchor = %closing.anchor,
        anchor_odometer = closing.anchor_odometer,
        charged = closing.charged,
        discharged = closing.discharged,
        odometer = current.odometer,
        "closing period"
    );
    closing.close(granularity, current.odometer)
}

/// Moves `timestamp` to [`SENTINEL_YEAR`], falling back to Feb 28 for a
/// leap day.
fn sentinel_timestamp(timestamp: &NaiveDateTime) -> Option<NaiveDateTime> {
    timestamp.with_year(SENTINEL_YEAR).or_else(|| {
        timestamp
            .with_day(28)
            .and_then(|t| t.with_year(SENTINEL_YEAR))
    })
}
