//! Error types for search requests and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// A search request that was rejected before any tree walk started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The root has to descend at least one ply to pick a move.
    #[error("search depth must be at least 1 ply")]
    ZeroDepth,

    #[error("search depth {depth} exceeds the configured maximum of {max}")]
    DepthLimit { depth: u8, max: u8 },

    #[error("position cannot be searched: {0}")]
    InvalidPosition(String),
}

/// Errors from reading or validating a `SearchConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
