//! Error types for ghr-shorturl

use thiserror::Error;

/// ghr-shorturl error type
#[derive(Error, Debug)]
pub enum ShortUrlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    ApiError {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Unknown shortening service: {0}")]
    UnknownService(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ShortUrlError>;
