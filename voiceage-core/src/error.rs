//! Error types for voiceage-core

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
///
/// Quality problems in the recording are never errors; they become advisory
/// warnings on a successful result.
#[derive(Error, Debug)]
pub enum Error {
    /// A selection pool was empty (reference data misconfigured)
    #[error("Empty selection pool: {0}")]
    EmptyPool(&'static str),

    /// Invalid caller-supplied input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
