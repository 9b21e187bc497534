//! Error types for deepstorm-report

use thiserror::Error;

/// Report error type
#[derive(Debug, Error)]
pub enum Error {
    /// Export error
    #[error("Export error: {0}")]
    ExportError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A report was sent before any destination was added
    #[error("No destination configured for report")]
    NoDestination,

    /// `perform_all` was called with no queued parts
    #[error("Nothing to report")]
    NothingToReport,

    /// The transport refused or failed to deliver the report
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, Error>;
