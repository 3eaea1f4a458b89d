//! Filtering of repeated monitor lines.
//!
//! The monitor keeps polling while the car is parked, so the log contains
//! long runs of lines that differ only in their timestamp. Such a line adds
//! nothing to any period and is skipped before parsing.

/// Remembers the previous line and flags lines that repeat it.
#[derive(Debug, Default)]
pub struct DuplicateFilter {
    previous: Option<String>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `line` repeats the previous line.
    ///
    /// A repeat has its first comma at the same offset as the previous line
    /// and is byte-identical from that comma on. The previous line is updated
    /// either way.
    pub fn is_repeat(&mut self, line: &str) -> bool {
        let repeat = self.previous.as_deref().is_some_and(|previous| {
            match (previous.find(','), line.find(',')) {
                (Some(prev_index), Some(index)) => {
                    prev_index == index && previous[prev_index..] == line[index..]
                }
                _ => false,
            }
        });
        self.previous = Some(line.to_string());
        repeat
    }
}
