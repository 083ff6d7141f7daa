//! Error types for hacker-stories
//!
//! Fetch failures of every kind collapse into one user-visible category,
//! storage failures are recovered by the caller.

use thiserror::Error;

/// Main error type for hacker-stories operations
#[derive(Error, Debug)]
pub enum StoriesError {
    #[error("Request failed: {0}")]
    FetchFailed(String),

    #[error("Search endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed search response: {0}")]
    Decode(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Search term is empty")]
    EmptyTerm,

    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for hacker-stories operations
pub type Result<T> = std::result::Result<T, StoriesError>;

impl StoriesError {
    /// Whether this error belongs to the single "fetch failed" category
    /// shown to the user through the error banner.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            StoriesError::FetchFailed(_)
                | StoriesError::HttpStatus(_)
                | StoriesError::Timeout
                | StoriesError::Decode(_)
        )
    }

    /// Check if this error is recoverable (the application keeps running)
    pub fn is_recoverable(&self) -> bool {
        self.is_fetch_failure() || matches!(self, StoriesError::StorageUnavailable(_))
    }
}

impl From<reqwest::Error> for StoriesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoriesError::Timeout
        } else if let Some(status) = err.status() {
            StoriesError::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            StoriesError::Decode(err.to_string())
        } else {
            StoriesError::FetchFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoriesError {
    fn from(err: serde_json::Error) -> Self {
        StoriesError::Decode(err.to_string())
    }
}
