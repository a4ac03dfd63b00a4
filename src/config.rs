use std::env;
use std::sync::LazyLock;

use crate::error::ConfigurationError;
use crate::event::synonyms::{LATEST_SYNONYM_VERSION, SynonymTable};

pub const SYNONYM_VERSION_ENV: &str = "VOLLEYBALL_SYNONYM_VERSION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub synonym_version: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            synonym_version: LATEST_SYNONYM_VERSION.to_string(),
        }
    }
}

impl ParserConfig {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_version_setting(env::var(SYNONYM_VERSION_ENV).ok().as_deref())
    }

    /// Builds a config from a raw setting value. Unset or blank selects the latest version.
    pub fn from_version_setting(setting: Option<&str>) -> Result<Self, ConfigurationError> {
        match setting.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(version) => {
                SynonymTable::lookup(version)?;
                Ok(Self {
                    synonym_version: version.to_string(),
                })
            }
        }
    }

    /// Per-call override, trimmed like the environment setting. Blank means the configured
    /// version.
    pub fn resolve_version<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            None | Some("") => &self.synonym_version,
            Some(version) => version,
        }
    }
}

static PROCESS_CONFIG: LazyLock<Result<ParserConfig, ConfigurationError>> =
    LazyLock::new(ParserConfig::from_env);

/// Configuration read from the environment, resolved once per process.
pub fn process_config() -> Result<&'static ParserConfig, ConfigurationError> {
    match &*PROCESS_CONFIG {
        Ok(config) => Ok(config),
        Err(err) => Err(err.clone()),
    }
}
