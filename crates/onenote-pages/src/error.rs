//! Error types for the OneNote page client.

use thiserror::Error;

pub type PageResult<T> = Result<T, PageError>;

#[derive(Debug, Error)]
pub enum PageError {
    /// Config file missing, unreadable or lacking a required key
    #[error("Configuration error: {0}")]
    Config(String),

    /// No usable bearer token could be obtained
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A notebook or section name had no match in the remote list
    #[error("Could not find {kind} {name}")]
    NotFound { kind: &'static str, name: String },

    /// Graph answered with an unexpected status
    #[error("Remote request failed: {status} - {body}")]
    RemoteRequestFailed { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PageError {
    pub fn notebook_not_found(name: impl Into<String>) -> Self {
        PageError::NotFound {
            kind: "notebook",
            name: name.into(),
        }
    }

    pub fn section_not_found(name: impl Into<String>) -> Self {
        PageError::NotFound {
            kind: "section",
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::NotFound { .. })
    }
}
