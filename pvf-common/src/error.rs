//! Common error types for PVF

use crate::rules::Rule;
use thiserror::Error;

/// Common result type for PVF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across PVF crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record failed a validation rule
    #[error("Record rejected by rule: {0}")]
    Rejected(Rule),

    /// Record passed every rule but a numeric field is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
