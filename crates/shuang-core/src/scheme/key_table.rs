use std::collections::HashMap;

use tracing::debug;

use super::{SchemeDefinition, COMPOUND_INITIALS, UNIVERSAL_INITIALS};

/// Result of translating one syllable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup {
    /// Nothing to translate (no syllable).
    Empty,
    /// The two keys to press.
    Keys(String),
    /// The scheme has no mapping for this syllable.
    Untranslatable,
}

impl KeyLookup {
    /// Required keys, or `None` when the unit needs no input.
    pub fn into_keys(self) -> Option<String> {
        match self {
            Self::Keys(keys) => Some(keys),
            Self::Empty | Self::Untranslatable => None,
        }
    }
}

/// Lookup tables compiled from a [`SchemeDefinition`].
#[derive(Debug, Clone)]
pub struct KeyTable {
    code: String,
    /// initial -> key, universal initials overlaid with the scheme's own.
    initials: HashMap<String, String>,
    /// (final, key), longest final first.
    finals: Vec<(String, String)>,
    zero_initials: HashMap<String, String>,
}

impl KeyTable {
    pub fn new(def: &SchemeDefinition) -> Self {
        let mut initials: HashMap<String, String> = UNIVERSAL_INITIALS
            .iter()
            .map(|c| (c.to_string(), c.to_string()))
            .collect();
        for (initial, key) in def.initial_pairs() {
            initials.insert(initial, key);
        }

        let mut finals = def.final_pairs();
        // Stable: equal lengths keep catalog order.
        finals.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let zero_initials = def
            .zero_initials
            .iter()
            .map(|(syllable, keys)| (syllable.trim().to_lowercase(), keys.clone()))
            .collect();

        Self {
            code: def.code.clone(),
            initials,
            finals,
            zero_initials,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Translate a tone-less syllable into the keys of this scheme.
    pub fn translate(&self, syllable: &str) -> KeyLookup {
        let syllable = syllable.trim().to_lowercase();
        if syllable.is_empty() {
            return KeyLookup::Empty;
        }

        if let Some(keys) = self.zero_initials.get(&syllable) {
            return KeyLookup::Keys(keys.clone());
        }

        let Some((initial_key, rest)) = self.split_initial(&syllable) else {
            debug!(scheme = %self.code, %syllable, "no initial");
            return KeyLookup::Untranslatable;
        };

        match self.finals.iter().find(|(fin, _)| fin == rest) {
            Some((_, final_key)) => KeyLookup::Keys(format!("{initial_key}{final_key}")),
            None => {
                debug!(scheme = %self.code, %syllable, "no final");
                KeyLookup::Untranslatable
            }
        }
    }

    /// Convenience for optional syllables: `None` means no input required.
    pub fn keys_for(&self, syllable: Option<&str>) -> Option<String> {
        syllable
            .map(|s| self.translate(s))
            .and_then(KeyLookup::into_keys)
    }

    /// Split off the initial, returning its key and the remaining final.
    fn split_initial<'a>(&self, syllable: &'a str) -> Option<(&str, &'a str)> {
        // zh/ch/sh are consumed whole, never as z/c/s followed by "h...".
        if let Some(compound) = COMPOUND_INITIALS.iter().find(|c| syllable.starts_with(**c)) {
            let key = self.initials.get(*compound)?;
            return Some((key.as_str(), &syllable[compound.len()..]));
        }

        let split = syllable.chars().next()?.len_utf8();
        let key = self.initials.get(&syllable[..split])?;
        Some((key.as_str(), &syllable[split..]))
    }
}
