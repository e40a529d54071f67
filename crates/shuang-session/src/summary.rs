use std::fmt;

use super::stats::StatsTracker;
use super::types::CharacterUnit;

/// One entry of the slowest-characters report.
#[derive(Debug, Clone, PartialEq)]
pub struct SlowChar {
    pub index: usize,
    pub ch: char,
    pub syllable: String,
    /// Seconds, rounded to two decimals.
    pub seconds: f64,
    pub attempts: u32,
}

/// Elapsed time in whole seconds, shown as `s秒`, `m分s秒` or `h小时m分s秒`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedDisplay(pub u64);

impl ElapsedDisplay {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms / 1000)
    }
}

impl fmt::Display for ElapsedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        if secs < 60 {
            write!(f, "{secs}秒")
        } else if secs < 3600 {
            write!(f, "{}分{}秒", secs / 60, secs % 60)
        } else {
            write!(
                f,
                "{}小时{}分{}秒",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60
            )
        }
    }
}

/// Snapshot of the statistics shown when a session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub elapsed_ms: u64,
    pub progress: u32,
    pub completed: usize,
    pub total_valid: usize,
    pub errors: usize,
    pub cycles: usize,
    pub slowest: Vec<SlowChar>,
}

impl CompletionSummary {
    pub fn elapsed(&self) -> ElapsedDisplay {
        ElapsedDisplay::from_millis(self.elapsed_ms)
    }
}

/// Up to `limit` characters with the longest recorded duration, longest
/// first. Equal durations keep index order.
pub fn slowest_chars(units: &[CharacterUnit], stats: &StatsTracker, limit: usize) -> Vec<SlowChar> {
    let mut timed: Vec<_> = stats
        .timings()
        .iter()
        .filter(|(_, record)| record.duration > 0)
        .collect();
    // Sort on raw milliseconds; sort_by is stable so ties keep index order.
    timed.sort_by(|(_, a), (_, b)| b.duration.cmp(&a.duration));
    timed
        .into_iter()
        .filter_map(|(&index, record)| {
            let unit = units.get(index)?;
            Some(SlowChar {
                index,
                ch: unit.ch,
                syllable: unit.syllable.clone().unwrap_or_default(),
                seconds: (record.duration as f64 / 10.0).round() / 100.0,
                attempts: record.input_count.max(1),
            })
        })
        .take(limit)
        .collect()
}
