//! Double-pinyin keyboard schemes and the syllable-to-keys translator.
//!
//! A scheme assigns every initial and final of a Mandarin syllable to one
//! key, so any syllable is typed with exactly two keystrokes. Syllables
//! without a consonant initial get an explicit two-key combination instead.

mod catalog;
mod config;
mod key_table;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use catalog::SchemeCatalog;
pub use config::{parse_schemes_toml, SchemeError};
pub use key_table::{KeyLookup, KeyTable};

pub const DEFAULT_SCHEMES_TOML: &str = include_str!("default_schemes.toml");

/// Single-letter initials shared by every scheme; each is typed with its own key.
pub const UNIVERSAL_INITIALS: [char; 20] = [
    'q', 'w', 'r', 't', 'y', 'p', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'z', 'x', 'c', 'b',
    'n', 'm',
];

/// Two-letter initials that are phonologically a single consonant.
pub const COMPOUND_INITIALS: [&str; 3] = ["zh", "ch", "sh"];

/// Returns the embedded default scheme TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SCHEMES_TOML
}

/// One keyboard scheme as written in the catalog.
///
/// `initials` and `finals` are keyed by keyboard key, with the phonetic
/// units for that key comma-separated; `zero_initials` maps whole syllables
/// to their two-key combination.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeDefinition {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub initials: BTreeMap<String, String>,
    pub finals: BTreeMap<String, String>,
    #[serde(default)]
    pub zero_initials: BTreeMap<String, String>,
}

impl SchemeDefinition {
    /// Compile the lookup tables used by the translator.
    pub fn key_table(&self) -> KeyTable {
        KeyTable::new(self)
    }

    /// `(initial, key)` pairs for the scheme-specific initials.
    pub fn initial_pairs(&self) -> Vec<(String, String)> {
        config::flatten(&self.initials)
    }

    /// `(final, key)` pairs in catalog order.
    pub fn final_pairs(&self) -> Vec<(String, String)> {
        config::flatten(&self.finals)
    }
}
