//! Core logic for summarizing a vehicle monitor log.
//!
//! This crate contains the fundamental types and logic for:
//! - Record parsing: turning a `monitor.csv` line into a [`TelemetryRecord`]
//! - Aggregation: folding records into day, week, month and year periods
//! - Summarizing: driving the aggregator over a stream of lines

mod aggregator;
pub mod dedup;
pub mod period;
pub mod record;
mod summary;
pub mod timestamp;

pub use aggregator::{PeriodAggregator, SENTINEL_YEAR};
pub use dedup::DuplicateFilter;
pub use period::{DISTANCE_NOISE_THRESHOLD, Granularity, PeriodAccumulator, PeriodReport};
pub use record::{ParseError, TelemetryRecord};
pub use summary::{SummaryError, SummaryStats, summarize};
pub use timestamp::{DateParseError, parse_timestamp};
