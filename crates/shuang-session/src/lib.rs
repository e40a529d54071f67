//! Stateful practice session: the character sequence, the cursor, the
//! lifecycle and the statistics of one typing run.
//!
//! `PracticeSession` owns the generated text and processes each submission,
//! returning an [`InputOutcome`] the front end renders. Time is always passed
//! in by the caller as milliseconds since the Unix epoch.

mod generate;
mod input;
mod lifecycle;
pub mod stats;
pub mod summary;
mod types;

#[cfg(test)]
mod tests;

use rand::rngs::StdRng;
use rand::SeedableRng;

use shuang_core::corpus::Corpus;
use shuang_core::scheme::{KeyTable, SchemeDefinition};
use shuang_core::text::{PinyinRomanizer, Romanizer};

pub use stats::{now_millis, CharTimingRecord, ErrorRecord, StatsTracker};
pub use summary::{slowest_chars, CompletionSummary, ElapsedDisplay, SlowChar};
pub use types::{
    CharacterUnit, InputOutcome, PracticeMode, SessionConfig, SessionError, SessionState,
    TextSource, UnitStatus, UnitView,
};

/// One typing-practice run over a generated character sequence.
pub struct PracticeSession {
    table: KeyTable,
    romanizer: Box<dyn Romanizer + Send>,
    corpus: Corpus,
    config: SessionConfig,
    rng: StdRng,

    units: Vec<CharacterUnit>,
    /// Mode the current units were generated for.
    text_mode: PracticeMode,
    cursor: usize,
    /// Partial input typed towards the current unit.
    pending: String,
    state: SessionState,
    stats: StatsTracker,
}

impl PracticeSession {
    /// Create a session romanizing with the `pinyin` crate. Text is generated
    /// immediately.
    pub fn new(scheme: &SchemeDefinition, corpus: Corpus, config: SessionConfig) -> Self {
        Self::with_romanizer(scheme, corpus, config, Box::new(PinyinRomanizer))
    }

    pub fn with_romanizer(
        scheme: &SchemeDefinition,
        corpus: Corpus,
        config: SessionConfig,
        romanizer: Box<dyn Romanizer + Send>,
    ) -> Self {
        let text_mode = config.mode;
        let mut session = Self {
            table: scheme.key_table(),
            romanizer,
            corpus,
            config,
            rng: StdRng::from_entropy(),
            units: Vec::new(),
            text_mode,
            cursor: 0,
            pending: String::new(),
            state: SessionState::NotStarted,
            stats: StatsTracker::new(),
        };
        session.generate();
        session
    }

    /// Reseed text selection, for reproducible runs.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.regenerate_if_idle();
    }

    pub fn set_scheme(&mut self, scheme: &SchemeDefinition) {
        self.table = scheme.key_table();
        self.regenerate_if_idle();
    }

    pub fn set_mode(&mut self, mode: PracticeMode) {
        self.config.mode = mode;
        self.regenerate_if_idle();
    }

    pub fn set_source(&mut self, source: TextSource) {
        self.config.source = source;
        self.regenerate_if_idle();
    }

    pub fn set_skip_non_chinese(&mut self, skip: bool) {
        self.config.skip_non_chinese = skip;
        self.regenerate_if_idle();
    }

    /// Settings changes only rebuild the text before the run starts; a
    /// running, paused or finished run keeps its sequence until reset.
    fn regenerate_if_idle(&mut self) {
        if self.state == SessionState::NotStarted {
            self.stats.reset();
            self.generate();
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn scheme_code(&self) -> &str {
        self.table.code()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pending_input(&self) -> &str {
        &self.pending
    }

    pub fn units(&self) -> &[CharacterUnit] {
        &self.units
    }

    /// The unit under the cursor, `None` once past the end.
    pub fn current_unit(&self) -> Option<&CharacterUnit> {
        self.units.get(self.cursor)
    }

    pub fn has_text(&self) -> bool {
        self.stats.total_valid() > 0
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Every unit tagged with its position relative to the cursor.
    pub fn unit_views(&self) -> Vec<UnitView<'_>> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, unit)| {
                let status = if i < self.cursor {
                    UnitStatus::Done
                } else if !unit.requires_input() {
                    UnitStatus::Passive
                } else if i == self.cursor {
                    UnitStatus::Current
                } else {
                    UnitStatus::Pending
                };
                UnitView { unit, status }
            })
            .collect()
    }

    pub fn summary(&self, now: u64) -> CompletionSummary {
        CompletionSummary {
            elapsed_ms: self.stats.elapsed_ms(now),
            progress: self.stats.progress(),
            completed: self.stats.completed(),
            total_valid: self.stats.total_valid(),
            errors: self.stats.error_count(),
            cycles: self.stats.cycles(),
            slowest: slowest_chars(&self.units, &self.stats, self.config.slowest_limit),
        }
    }
}
