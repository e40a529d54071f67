mod proptest_fsm;

use std::collections::HashMap;

use shuang_core::corpus::Corpus;
use shuang_core::scheme::{SchemeCatalog, SchemeDefinition};
use shuang_core::text::Romanizer;

use super::{InputOutcome, PracticeMode, PracticeSession, SessionConfig, TextSource};

/// Fixed readings so tests do not depend on the `pinyin` crate's data.
///
/// Xiaohe keys: 中 vs, 国 go, 你 ni, 好 hc, 春 iy, 风 fg, 天 tm, 安 an.
pub(super) struct TableRomanizer(HashMap<char, &'static str>);

impl TableRomanizer {
    pub(super) fn new() -> Self {
        Self(HashMap::from([
            ('中', "zhong"),
            ('国', "guo"),
            ('你', "ni"),
            ('好', "hao"),
            ('春', "chun"),
            ('风', "feng"),
            ('天', "tian"),
            ('安', "an"),
        ]))
    }
}

impl Romanizer for TableRomanizer {
    fn romanize(&self, text: &str) -> Vec<Option<String>> {
        text.chars()
            .map(|c| self.0.get(&c).map(|s| s.to_string()))
            .collect()
    }
}

pub(super) fn xiaohe() -> &'static SchemeDefinition {
    SchemeCatalog::global().get("xiaohe").unwrap()
}

pub(super) fn corpus(sentences: &[&str], words: &[&str]) -> Corpus {
    Corpus {
        words: words.iter().map(|s| s.to_string()).collect(),
        sentences: sentences.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn make_session(corpus: Corpus, config: SessionConfig) -> PracticeSession {
    let mut session =
        PracticeSession::with_romanizer(xiaohe(), corpus, config, Box::new(TableRomanizer::new()));
    session.set_seed(7);
    session
}

/// Sentence session over exactly one sentence.
pub(super) fn sentence_session(text: &str) -> PracticeSession {
    make_session(corpus(&[text], &[]), SessionConfig::default())
}

pub(super) fn word_session(words: &str) -> PracticeSession {
    let config = SessionConfig {
        mode: PracticeMode::Word,
        ..SessionConfig::default()
    };
    make_session(corpus(&[], &[words]), config)
}

pub(super) fn upload_session(lines: &[&str], builtin: &[&str]) -> PracticeSession {
    let config = SessionConfig {
        source: TextSource::Upload(lines.iter().map(|s| s.to_string()).collect()),
        ..SessionConfig::default()
    };
    make_session(corpus(builtin, &[]), config)
}

pub(super) fn current_keys(session: &PracticeSession) -> String {
    session
        .current_unit()
        .and_then(|u| u.keys.clone())
        .unwrap_or_default()
}

/// Submit the correct keys for the current unit.
pub(super) fn type_current(session: &mut PracticeSession, now: u64) -> InputOutcome {
    let keys = current_keys(session);
    session.submit_input(&keys, now)
}

/// The string of unit characters, in order.
pub(super) fn text_of(session: &PracticeSession) -> String {
    session.units().iter().map(|u| u.ch).collect()
}
