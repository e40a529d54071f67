use std::sync::OnceLock;

use super::config::{parse_schemes_toml, SchemeError};
use super::{SchemeDefinition, DEFAULT_SCHEMES_TOML};

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Ordered set of scheme definitions; the first one is the default.
#[derive(Debug, Clone)]
pub struct SchemeCatalog {
    schemes: Vec<SchemeDefinition>,
}

impl SchemeCatalog {
    pub fn from_toml(toml_str: &str) -> Result<Self, SchemeError> {
        let schemes = parse_schemes_toml(toml_str)?;
        Ok(Self { schemes })
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), SchemeError> {
        // Validate eagerly
        parse_schemes_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| SchemeError::AlreadyInitialized)
    }

    /// Get or initialize the global catalog.
    pub fn global() -> &'static SchemeCatalog {
        static INSTANCE: OnceLock<SchemeCatalog> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_SCHEMES_TOML);
            SchemeCatalog::from_toml(toml_str).expect("scheme TOML must be valid")
        })
    }

    pub fn get(&self, code: &str) -> Option<&SchemeDefinition> {
        self.schemes.iter().find(|s| s.code == code)
    }

    /// Like `get`, but an unknown code is an error.
    pub fn resolve(&self, code: &str) -> Result<&SchemeDefinition, SchemeError> {
        self.get(code)
            .ok_or_else(|| SchemeError::UnknownScheme(code.to_string()))
    }

    pub fn default_scheme(&self) -> &SchemeDefinition {
        // parse_schemes_toml rejects an empty list
        &self.schemes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemeDefinition> {
        self.schemes.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.schemes.iter().map(|s| s.code.as_str()).collect()
    }
}
