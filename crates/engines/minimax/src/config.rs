//! Search settings, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, eval::PieceValues};

/// Tunables for `Searcher` and `MinimaxEngine`.
///
/// Every field has a default, so a partial (or empty) file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched when the caller does not name a depth.
    pub depth: u8,
    /// Requests deeper than this are refused.
    pub max_depth: u8,
    /// Seed for the fallback move picker. Unset means seeded from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub piece_values: PieceValues,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            max_depth: 6,
            seed: None,
            piece_values: PieceValues::STANDARD,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Invalid("depth must be at least 1".into()));
        }
        if self.depth > self.max_depth {
            return Err(ConfigError::Invalid(format!(
                "depth {} exceeds max_depth {}",
                self.depth, self.max_depth
            )));
        }
        self.piece_values.validate()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
