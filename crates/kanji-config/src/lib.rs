use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::progress::ProgressConfig;
use self::table::TableConfig;

pub mod lookup;
pub mod progress;
pub mod table;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub table: TableConfig,
    pub progress: ProgressConfig,
}

impl Config {
    /// Defaults, overridden by environment variables
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Read a JSON config file. Missing keys fall back to defaults and
    /// environment variables still take precedence.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply `KANJI_*` overrides from `var`
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("KANJI_LOOKUP_URL") {
            self.lookup.base_url = url;
        }

        if let Some(timeout) = var("KANJI_LOOKUP_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.lookup.timeout_seconds = timeout;
        }

        if let Some(column) = var("KANJI_COLUMN").and_then(|v| v.parse().ok()) {
            self.table.kanji_column = column;
        }

        if let Some(column) = var("KANJI_DEFINITION_COLUMN").and_then(|v| v.parse().ok()) {
            self.table.definition_column = column;
        }

        if let Some(prefix) = var("KANJI_OUTPUT_PREFIX") {
            self.table.output_prefix = prefix;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.kanji_column == self.table.definition_column {
            return Err(ConfigError::Invalid(format!(
                "kanji and definition columns are both {}",
                self.table.kanji_column
            )));
        }

        if self.table.output_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "output prefix must not be empty".to_string(),
            ));
        }

        if self.progress.bar_width == 0 {
            return Err(ConfigError::Invalid(
                "progress bar width must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
