//! Text preparation: split practice text into characters and attach the
//! syllable each one is typed as.

use pinyin::ToPinyin;
use tracing::{debug, debug_span};

use crate::unicode::{is_hanzi, is_latin_or_digit, strip_whitespace};

/// Source of tone-less syllables for Chinese characters.
pub trait Romanizer {
    /// Romanize `text` as a whole so implementations may pick context
    /// dependent readings. The result holds one entry per character of
    /// `text`, `None` where no reading is known.
    fn romanize(&self, text: &str) -> Vec<Option<String>>;
}

/// Romanizer backed by the `pinyin` crate's tone-less readings.
///
/// Reads each character on its own. The crate has no phrase or context
/// mode, so this matches romanizing the whole text at once: every
/// character gets its default reading wherever it appears.
///
/// `ü` is written as `v`, the spelling every double-pinyin scheme uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinyinRomanizer;

impl Romanizer for PinyinRomanizer {
    fn romanize(&self, text: &str) -> Vec<Option<String>> {
        text.chars()
            .map(|c| c.to_pinyin().map(|p| p.plain().replace('ü', "v")))
            .collect()
    }
}

/// One character of practice text with its syllable, if it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedChar {
    pub ch: char,
    pub syllable: Option<String>,
}

/// Strip whitespace from `text` and pair every remaining character with
/// its syllable.
///
/// Hanzi take the reading at the same position of the romanized text.
/// Latin letters and digits become their own lowercase pseudo-syllable
/// unless `skip_non_chinese` is set. Everything else has no syllable.
pub fn prepare_text(
    text: &str,
    skip_non_chinese: bool,
    romanizer: &dyn Romanizer,
) -> Vec<PreparedChar> {
    let _span = debug_span!("prepare_text", skip_non_chinese).entered();

    let stripped = strip_whitespace(text);
    let readings = romanizer.romanize(&stripped);
    let char_count = stripped.chars().count();
    if readings.len() != char_count {
        debug!(
            chars = char_count,
            readings = readings.len(),
            "romanizer output misaligned"
        );
    }

    stripped
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let syllable = if is_hanzi(ch) {
                readings
                    .get(i)
                    .cloned()
                    .flatten()
                    .filter(|s| !s.trim().is_empty())
            } else if !skip_non_chinese && is_latin_or_digit(ch) {
                Some(ch.to_ascii_lowercase().to_string())
            } else {
                None
            };
            PreparedChar { ch, syllable }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Romanizer with a fixed per-character table.
    struct TableRomanizer(HashMap<char, &'static str>);

    impl TableRomanizer {
        fn new(pairs: &[(char, &'static str)]) -> Self {
            Self(pairs.iter().copied().collect())
        }
    }

    impl Romanizer for TableRomanizer {
        fn romanize(&self, text: &str) -> Vec<Option<String>> {
            text.chars()
                .map(|c| self.0.get(&c).map(|s| s.to_string()))
                .collect()
        }
    }

    /// Romanizer that drops the last reading.
    struct ShortRomanizer;

    impl Romanizer for ShortRomanizer {
        fn romanize(&self, text: &str) -> Vec<Option<String>> {
            let n = text.chars().count().saturating_sub(1);
            vec![Some("zhong".to_string()); n]
        }
    }

    fn syllables(prepared: &[PreparedChar]) -> Vec<Option<&str>> {
        prepared.iter().map(|p| p.syllable.as_deref()).collect()
    }

    #[test]
    fn hanzi_take_aligned_readings() {
        let r = TableRomanizer::new(&[('中', "zhong"), ('国', "guo")]);
        let prepared = prepare_text("中 国", false, &r);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].ch, '中');
        assert_eq!(syllables(&prepared), [Some("zhong"), Some("guo")]);
    }

    #[test]
    fn latin_and_digits_are_pseudo_syllables() {
        let r = TableRomanizer::new(&[('中', "zhong")]);
        let prepared = prepare_text("A5中，", false, &r);
        assert_eq!(
            syllables(&prepared),
            [Some("a"), Some("5"), Some("zhong"), None]
        );
    }

    #[test]
    fn skip_non_chinese_drops_pseudo_syllables() {
        let r = TableRomanizer::new(&[('中', "zhong")]);
        let prepared = prepare_text("A5中", true, &r);
        assert_eq!(syllables(&prepared), [None, None, Some("zhong")]);
    }

    #[test]
    fn unknown_hanzi_has_no_syllable() {
        let r = TableRomanizer::new(&[]);
        let prepared = prepare_text("中", false, &r);
        assert_eq!(syllables(&prepared), [None]);
    }

    #[test]
    fn misaligned_tail_degrades_to_none() {
        let prepared = prepare_text("中中中", false, &ShortRomanizer);
        assert_eq!(
            syllables(&prepared),
            [Some("zhong"), Some("zhong"), None]
        );
    }

    #[test]
    fn whitespace_only_is_empty() {
        let prepared = prepare_text(" \n\t ", false, &PinyinRomanizer);
        assert!(prepared.is_empty());
    }

    #[test]
    fn pinyin_romanizer_plain_readings() {
        let readings = PinyinRomanizer.romanize("中国a");
        assert_eq!(
            readings,
            [Some("zhong".to_string()), Some("guo".to_string()), None]
        );
    }

    #[test]
    fn pinyin_romanizer_writes_v_for_u_umlaut() {
        let readings = PinyinRomanizer.romanize("女");
        assert_eq!(readings, [Some("nv".to_string())]);
    }

    #[test]
    fn pinyin_romanizer_reading_ignores_neighbours() {
        let whole = PinyinRomanizer.romanize("银行行走");
        let single: Vec<_> = "银行行走"
            .chars()
            .flat_map(|c| PinyinRomanizer.romanize(&c.to_string()))
            .collect();
        assert_eq!(whole, single);
        assert_eq!(whole[1], whole[2]);
    }
}
