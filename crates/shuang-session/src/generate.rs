use rand::seq::SliceRandom;
use tracing::{debug, debug_span, warn};

use shuang_core::text::prepare_text;

use super::types::{CharacterUnit, PracticeMode, TextSource};
use super::PracticeSession;

impl PracticeSession {
    /// Build a fresh character sequence for the current mode and source.
    ///
    /// The cursor lands on the first unit that needs input; statistics other
    /// than the valid-character total are left to the caller.
    pub(crate) fn generate(&mut self) {
        let _span = debug_span!("generate", mode = %self.config.mode).entered();

        let text = self.select_text();
        let prepared = prepare_text(
            &text,
            self.config.skip_non_chinese,
            &*self.romanizer,
        );
        self.units = prepared
            .into_iter()
            .map(|p| CharacterUnit {
                keys: self.table.keys_for(p.syllable.as_deref()),
                ch: p.ch,
                syllable: p.syllable,
            })
            .collect();
        self.text_mode = self.config.mode;
        self.cursor = 0;
        self.pending.clear();
        self.skip_passive();

        let valid = self.units.iter().filter(|u| u.requires_input()).count();
        self.stats.set_total_valid(valid);
        if valid == 0 {
            warn!(units = self.units.len(), "generated text has nothing to type");
        }
        debug!(units = self.units.len(), valid, "text generated");
    }

    fn select_text(&mut self) -> String {
        match self.config.mode {
            PracticeMode::Sentence => {
                let sentences = match &self.config.source {
                    TextSource::Upload(lines) if !lines.is_empty() => lines,
                    _ => &self.corpus.sentences,
                };
                sentences.choose(&mut self.rng).cloned().unwrap_or_default()
            }
            // Uploads only feed sentence practice.
            PracticeMode::Word => {
                let mut chars = self.corpus.word_chars();
                chars.shuffle(&mut self.rng);
                chars.into_iter().collect()
            }
        }
    }

    /// Move the cursor past units that need no input.
    pub(crate) fn skip_passive(&mut self) {
        while self
            .units
            .get(self.cursor)
            .is_some_and(|u| !u.requires_input())
        {
            self.cursor += 1;
        }
    }

    /// Start the next pass of word practice over a reshuffled sequence.
    pub(crate) fn wrap_cycle(&mut self) {
        self.units.shuffle(&mut self.rng);
        self.cursor = 0;
        // Timings only cover the current pass; errors carry their own char.
        self.stats.clear_timings();
        self.stats.increment_cycles();
        debug!(cycles = self.stats.cycles(), "word sequence wrapped");
    }
}
