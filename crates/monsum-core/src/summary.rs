//! Driving the aggregator over a stream of monitor lines.

use std::io::{self, BufRead};

use thiserror::Error;

use crate::aggregator::PeriodAggregator;
use crate::dedup::DuplicateFilter;
use crate::period::PeriodReport;
use crate::record::{ParseError, TelemetryRecord};

/// Errors that abort a summary run.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Reading the input failed.
    #[error("failed to read line {line}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A line could not be parsed.
    #[error("invalid record on line {line}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Counters from one summary run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub lines_read: usize,
    pub blank_lines: usize,
    pub duplicates_skipped: usize,
    pub records_ingested: usize,
    pub reports_emitted: usize,
}

/// Summarizes a monitor log, handing each report to `on_report` as soon as
/// its period closes.
///
/// Blank lines and repeated lines are skipped. The first malformed line
/// aborts the run.
pub fn summarize<R, F>(reader: R, mut on_report: F) -> Result<SummaryStats, SummaryError>
where
    R: BufRead,
    F: FnMut(&PeriodReport),
{
    let mut stats = SummaryStats::default();
    let mut filter = DuplicateFilter::new();
    let mut aggregator = PeriodAggregator::new();

    let mut emit = |reports: Vec<PeriodReport>, stats: &mut SummaryStats| {
        for report in &reports {
            on_report(report);
        }
        stats.reports_emitted += reports.len();
    };

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| SummaryError::Io {
            line: line_no,
            source,
        })?;
        stats.lines_read += 1;

        let line = line.trim();
        tracing::debug!(line = line_no, raw = line, "read line");
        if line.is_empty() {
            stats.blank_lines += 1;
            continue;
        }
        if filter.is_repeat(line) {
            tracing::trace!(line = line_no, "skipping repeated line");
            stats.duplicates_skipped += 1;
            continue;
        }

        let record: TelemetryRecord = line.parse().map_err(|source| SummaryError::Parse {
            line: line_no,
            source,
        })?;
        emit(aggregator.ingest(record), &mut stats);
    }

    tracing::debug!("handling last values");
    emit(aggregator.finish(), &mut stats);
    stats.records_ingested = aggregator.records_ingested();

    Ok(stats)
}
