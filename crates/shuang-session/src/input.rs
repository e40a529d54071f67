use std::cmp::Ordering;

use tracing::{debug, debug_span};

use super::types::{InputOutcome, PracticeMode, SessionState};
use super::PracticeSession;

impl PracticeSession {
    /// Check `raw` against the keys of the current unit.
    ///
    /// Input is trimmed and lowercased. Shorter input is kept as pending and
    /// changes nothing else; longer or wrong input of full length is recorded
    /// as an error and cleared; an exact match advances the cursor.
    pub fn submit_input(&mut self, raw: &str, now: u64) -> InputOutcome {
        if self.state != SessionState::Running || self.cursor >= self.units.len() {
            return InputOutcome::Ignored;
        }
        let _span = debug_span!("submit_input", cursor = self.cursor).entered();

        if !self.units[self.cursor].requires_input() {
            return self.pass_over(now);
        }

        let expected = self.units[self.cursor]
            .keys
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let input = raw.trim().to_lowercase();

        match input.chars().count().cmp(&expected.chars().count()) {
            Ordering::Less => {
                self.pending = input;
                InputOutcome::Waiting
            }
            Ordering::Greater => {
                self.reject(&input, now);
                InputOutcome::Error { too_long: true }
            }
            Ordering::Equal if input == expected => self.accept(now),
            Ordering::Equal => {
                self.reject(&input, now);
                InputOutcome::Error { too_long: false }
            }
        }
    }

    /// Append one key to the pending input and submit the result.
    pub fn push_key(&mut self, key: char, now: u64) -> InputOutcome {
        if self.state != SessionState::Running {
            return InputOutcome::Ignored;
        }
        let mut buffer = self.pending.clone();
        buffer.push(key);
        self.submit_input(&buffer, now)
    }

    /// Drop the last pending key. Returns false when nothing was pending.
    pub fn backspace(&mut self) -> bool {
        self.pending.pop().is_some()
    }

    fn reject(&mut self, input: &str, now: u64) {
        debug!(input, "wrong keys");
        let ch = self.units[self.cursor].ch;
        self.stats.record_error(self.cursor, ch, input, now);
        self.pending.clear();
    }

    fn accept(&mut self, now: u64) -> InputOutcome {
        let duration = self.stats.complete_char(self.cursor, now);
        debug!(duration, "unit typed");
        self.pending.clear();
        self.cursor += 1;

        if self.text_mode == PracticeMode::Word {
            self.skip_passive();
            if self.cursor >= self.units.len() {
                self.wrap_cycle();
                self.skip_passive();
            }
            self.open_current(now);
            return InputOutcome::Correct { word_mode: true };
        }

        self.stats.increment_completed();
        self.skip_passive();
        if self.cursor >= self.units.len() {
            self.finish(now);
            return InputOutcome::Completed;
        }
        self.open_current(now);
        InputOutcome::Correct { word_mode: false }
    }

    /// The cursor sits on a unit needing no input; move past it.
    fn pass_over(&mut self, now: u64) -> InputOutcome {
        self.skip_passive();
        if self.cursor < self.units.len() {
            self.open_current(now);
            return InputOutcome::Skipped;
        }
        match self.text_mode {
            PracticeMode::Word => {
                self.wrap_cycle();
                self.skip_passive();
                self.open_current(now);
                InputOutcome::Skipped
            }
            PracticeMode::Sentence => {
                self.finish(now);
                InputOutcome::Completed
            }
        }
    }

    pub(crate) fn open_current(&mut self, now: u64) {
        if self.cursor < self.units.len() {
            self.stats.open_char(self.cursor, now);
        }
    }
}
