//! Error types for ghr-core

use thiserror::Error;

/// Main error type for ghr-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Invalid command pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for ghr-core
pub type Result<T> = std::result::Result<T, Error>;
