//! Per-session statistics: counters, per-character timing and error records.
//!
//! All timestamps are milliseconds since the Unix epoch and are passed in by
//! the caller, so elapsed time is always recomputed from timestamps.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Timing of one character index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharTimingRecord {
    /// When the character last became current.
    pub start_time: Option<u64>,
    /// When it was last completed.
    pub end_time: Option<u64>,
    /// Time spent on the last completion, pauses excluded.
    pub duration: u64,
    /// Decisive submissions: wrong entries count as attempts alongside the
    /// completion, so a character typed right first time shows 1.
    pub input_count: u32,
    /// Pause time accrued since the character became current.
    pub pause_duration: u64,
}

impl CharTimingRecord {
    fn is_open(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_none()
    }
}

/// One wrong submission. Kept until a full reset, across word-mode passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Character that was current; word-mode passes reorder indices.
    pub ch: char,
    pub input: String,
    pub time: u64,
    /// Word-mode pass the error happened in, 0 for the first.
    pub cycle: usize,
}

#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
    total_valid: usize,
    completed: usize,
    cycles: usize,
    error_count: usize,
    start_time: Option<u64>,
    pause_started: Option<u64>,
    total_paused: u64,
    errors: BTreeMap<usize, Vec<ErrorRecord>>,
    timings: BTreeMap<usize, CharTimingRecord>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_total_valid(&mut self, total: usize) {
        self.total_valid = total;
    }

    pub(crate) fn increment_completed(&mut self) {
        self.completed += 1;
    }

    pub(crate) fn increment_cycles(&mut self) {
        self.cycles += 1;
    }

    /// Drop per-index timing records. Error records survive.
    pub(crate) fn clear_timings(&mut self) {
        self.timings.clear();
    }

    /// Start the session clock; later calls keep the first start.
    pub(crate) fn start(&mut self, now: u64) {
        self.start_time.get_or_insert(now);
    }

    /// Open timing for the character that just became current.
    pub(crate) fn open_char(&mut self, index: usize, now: u64) {
        let record = self.timings.entry(index).or_default();
        record.start_time = Some(now);
        record.end_time = None;
        record.pause_duration = 0;
    }

    /// Close timing for `index`; returns the measured duration.
    pub(crate) fn complete_char(&mut self, index: usize, now: u64) -> u64 {
        let record = self.timings.entry(index).or_default();
        let start = *record.start_time.get_or_insert(now);
        record.duration = now
            .saturating_sub(start)
            .saturating_sub(record.pause_duration);
        record.end_time = Some(now);
        record.input_count += 1;
        record.pause_duration = 0;
        record.duration
    }

    pub(crate) fn record_error(&mut self, index: usize, ch: char, input: &str, now: u64) {
        self.errors.entry(index).or_default().push(ErrorRecord {
            ch,
            input: input.to_string(),
            time: now,
            cycle: self.cycles,
        });
        self.error_count += 1;
        self.timings.entry(index).or_default().input_count += 1;
    }

    /// Freeze the clock. A second pause keeps the first instant.
    pub(crate) fn pause(&mut self, now: u64) {
        self.pause_started.get_or_insert(now);
    }

    /// Unfreeze the clock, charging the pause to the session and to the
    /// character at `current` if it is still open.
    pub(crate) fn resume(&mut self, current: usize, now: u64) {
        let Some(paused_at) = self.pause_started.take() else {
            return;
        };
        let paused = now.saturating_sub(paused_at);
        self.total_paused += paused;
        if let Some(record) = self.timings.get_mut(&current) {
            if record.is_open() {
                record.pause_duration += paused;
            }
        }
    }

    /// Active practice time: wall clock since start minus pauses, frozen
    /// while paused.
    pub fn elapsed_ms(&self, now: u64) -> u64 {
        let Some(start) = self.start_time else {
            return 0;
        };
        let end = self.pause_started.unwrap_or(now);
        end.saturating_sub(start).saturating_sub(self.total_paused)
    }

    /// Completed share of the valid characters, rounded to a whole percent.
    pub fn progress(&self) -> u32 {
        if self.total_valid == 0 {
            return 0;
        }
        (self.completed as f64 / self.total_valid as f64 * 100.0).round() as u32
    }

    pub fn total_valid(&self) -> usize {
        self.total_valid
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Full passes through the word-practice sequence.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    pub fn total_paused(&self) -> u64 {
        self.total_paused
    }

    pub fn is_clock_paused(&self) -> bool {
        self.pause_started.is_some()
    }

    pub fn errors(&self) -> &BTreeMap<usize, Vec<ErrorRecord>> {
        &self.errors
    }

    pub fn errors_at(&self, index: usize) -> &[ErrorRecord] {
        self.errors.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn timings(&self) -> &BTreeMap<usize, CharTimingRecord> {
        &self.timings
    }

    pub fn timing(&self, index: usize) -> Option<&CharTimingRecord> {
        self.timings.get(&index)
    }
}
