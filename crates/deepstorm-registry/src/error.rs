//! Error types for deepstorm-registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a registry
///
/// Lookups never fail: a missing journal is reported as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// The RON configuration could not be parsed
    #[error("invalid registry config: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// The configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two presets use the same journal name
    #[error("journal {0:?} is configured more than once")]
    DuplicatePreset(String),
}
