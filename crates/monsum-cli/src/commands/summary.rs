//! Summary command: day, week, month and year totals of a monitor log.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use monsum_core::{SummaryStats, summarize};

/// Summarizes the monitor log at `input`, writing one line per reported
/// period to `writer` as soon as the period closes.
pub fn run<W: Write>(writer: &mut W, input: &Path) -> Result<SummaryStats> {
    let file =
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?;

    let mut write_result: io::Result<()> = Ok(());
    let stats = summarize(BufReader::new(file), |report| {
        if write_result.is_ok() {
            write_result = writeln!(writer, "{report}");
        }
    })
    .with_context(|| format!("failed to summarize {}", input.display()))?;
    write_result.context("failed to write report")?;

    tracing::debug!(
        lines = stats.lines_read,
        duplicates = stats.duplicates_skipped,
        records = stats.records_ingested,
        reports = stats.reports_emitted,
        "summary complete"
    );
    Ok(stats)
}
