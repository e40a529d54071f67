use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use super::SchemeDefinition;

#[derive(Deserialize)]
struct SchemeFile {
    #[serde(default)]
    schemes: Vec<SchemeDefinition>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[[schemes]] list is empty")]
    Empty,
    #[error("scheme without code")]
    MissingCode,
    #[error("duplicate scheme code: {0}")]
    DuplicateCode(String),
    #[error("{scheme}: invalid key {key:?} (must be a single ASCII character)")]
    InvalidKey { scheme: String, key: String },
    #[error("{scheme}: invalid initial {initial:?} on key {key:?}")]
    InvalidInitial {
        scheme: String,
        key: String,
        initial: String,
    },
    #[error("{scheme}: final {fin:?} is listed under both {first:?} and {second:?}")]
    DuplicateFinal {
        scheme: String,
        fin: String,
        first: String,
        second: String,
    },
    #[error("{scheme}: zero-initial {syllable:?} must map to exactly two keys, got {value:?}")]
    InvalidZeroInitial {
        scheme: String,
        syllable: String,
        value: String,
    },
    #[error("unknown scheme: {0}")]
    UnknownScheme(String),
    #[error("scheme catalog already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into validated scheme definitions, in file order.
pub fn parse_schemes_toml(toml_str: &str) -> Result<Vec<SchemeDefinition>, SchemeError> {
    let file: SchemeFile =
        toml::from_str(toml_str).map_err(|e| SchemeError::Parse(e.to_string()))?;

    if file.schemes.is_empty() {
        return Err(SchemeError::Empty);
    }

    let mut codes = HashSet::new();
    for scheme in &file.schemes {
        if scheme.code.trim().is_empty() {
            return Err(SchemeError::MissingCode);
        }
        if !codes.insert(scheme.code.as_str()) {
            return Err(SchemeError::DuplicateCode(scheme.code.clone()));
        }
        validate(scheme)?;
    }

    Ok(file.schemes)
}

fn validate(s: &SchemeDefinition) -> Result<(), SchemeError> {
    let check_key = |key: &str| {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_graphic() => Ok(()),
            _ => Err(SchemeError::InvalidKey {
                scheme: s.code.clone(),
                key: key.to_string(),
            }),
        }
    };

    for (key, initials) in &s.initials {
        check_key(key)?;
        for initial in split_list(initials) {
            let valid = matches!(initial, "zh" | "ch" | "sh")
                || (initial.len() == 1 && initial.chars().all(|c| c.is_ascii_lowercase()));
            if !valid {
                return Err(SchemeError::InvalidInitial {
                    scheme: s.code.clone(),
                    key: key.clone(),
                    initial: initial.to_string(),
                });
            }
        }
    }

    // A final may only live under one key, otherwise the length-ordered
    // lookup would depend on map iteration order.
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (key, finals) in &s.finals {
        check_key(key)?;
        for fin in split_list(finals) {
            if let Some(first) = seen.insert(fin, key.as_str()) {
                return Err(SchemeError::DuplicateFinal {
                    scheme: s.code.clone(),
                    fin: fin.to_string(),
                    first: first.to_string(),
                    second: key.clone(),
                });
            }
        }
    }

    for (syllable, value) in &s.zero_initials {
        if value.chars().count() != 2 {
            return Err(SchemeError::InvalidZeroInitial {
                scheme: s.code.clone(),
                syllable: syllable.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}

/// Split a comma-separated list, dropping blanks.
pub(crate) fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Group a `key -> "a,b"` table into `(item, key)` pairs.
pub(crate) fn flatten(table: &BTreeMap<String, String>) -> Vec<(String, String)> {
    table
        .iter()
        .flat_map(|(key, list)| split_list(list).map(move |item| (item.to_string(), key.clone())))
        .collect()
}
