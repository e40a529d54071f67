//! Practice texts: the built-in word pool and sentence list, plus parsing
//! of uploaded sentence files.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_CORPUS_TOML: &str = include_str!("default_corpus.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("no usable lines in source")]
    EmptySource,
    #[error("corpus already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub sentences: Vec<String>,
}

impl Corpus {
    /// Set custom TOML before first `builtin()` call.
    pub fn init_custom(toml_content: String) -> Result<(), CorpusError> {
        parse_corpus_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| CorpusError::AlreadyInitialized)
    }

    /// Get or initialize the built-in corpus.
    pub fn builtin() -> &'static Corpus {
        static INSTANCE: OnceLock<Corpus> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_CORPUS_TOML);
            parse_corpus_toml(toml_str).expect("corpus TOML must be valid")
        })
    }

    /// All word-pool characters in order, whitespace removed.
    pub fn word_chars(&self) -> Vec<char> {
        self.words
            .iter()
            .flat_map(|w| w.chars())
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.sentences.is_empty()
    }
}

/// Parse a corpus TOML. Blank entries are dropped; empty lists are allowed
/// and leave the session with nothing to practice.
pub fn parse_corpus_toml(toml_str: &str) -> Result<Corpus, CorpusError> {
    let mut corpus: Corpus =
        toml::from_str(toml_str).map_err(|e| CorpusError::Parse(e.to_string()))?;
    corpus.words = clean_lines(corpus.words);
    corpus.sentences = clean_lines(corpus.sentences);
    Ok(corpus)
}

/// Split uploaded text into practice sentences: one per line, trimmed,
/// blank lines dropped.
pub fn parse_sentence_lines(content: &str) -> Result<Vec<String>, CorpusError> {
    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if lines.is_empty() {
        return Err(CorpusError::EmptySource);
    }
    Ok(lines)
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
