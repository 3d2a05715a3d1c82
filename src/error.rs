//! Error types for the storage facts engine
//!
//! Provides structured error types for the classifier and capacity
//! processor. Malformed per-record data is never an error here: it degrades
//! to `invalid` annotations in the output fact instead (see the classifier).

use thiserror::Error;

/// Unified error type for the engine
#[derive(Error, Debug)]
pub enum Error {
    /// A required collaborator is missing or misconfigured. Raised when
    /// capacity fields are encountered without a byte formatter available.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The byte formatter rejected a capacity value.
    #[error("Capacity parse error: {value}: {reason}")]
    CapacityParse { value: String, reason: String },
}

impl Error {
    /// Check if this error is a configuration problem (missing collaborator)
    /// as opposed to bad capacity data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Check if this error is retryable. Configuration errors are not:
    /// retrying without wiring a formatter in cannot succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::Configuration(_))
    }
}

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, Error>;
