//! Error types for ghr-github

use serde_json::{Value, json};
use thiserror::Error;

/// ghr-github error type
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub API error: {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl GitHubError {
    /// Error payload as shown to chat users
    pub fn to_json(&self) -> String {
        let value: Value = match self {
            Self::ApiError { status, message } => json!({ "code": status, "message": message }),
            Self::HttpError(e) => {
                json!({ "code": e.status().map(|s| s.as_u16()), "message": e.to_string() })
            }
            Self::ParseError(e) => json!({ "message": format!("Failed to parse response: {}", e) }),
            Self::InvalidUrl(e) => json!({ "message": format!("Invalid request URL: {}", e) }),
        };
        value.to_string()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GitHubError>;
