//! Error types for folio-seed
//!
//! Malformed rows never surface here: the reader skips them. What does
//! surface is anything that should abort a stage (unreadable inputs, a bad
//! artifact, storage failures).

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum SeedError {
    /// An input file could not be opened or read
    #[error("Cannot read source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cleaned JSON artifact is missing, unreadable or malformed
    #[error("Artifact {path}: {message}")]
    Artifact { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// folio-common error
    #[error(transparent)]
    Common(#[from] folio_common::Error),
}

/// Result type for pipeline operations
pub type SeedResult<T> = Result<T, SeedError>;
