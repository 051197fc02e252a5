//! Error types for fetching terms.

use thiserror::Error;

/// Errors from a [`TermsProvider`](crate::provider::TermsProvider)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source could not be reached
    #[error("terms source unavailable: {0}")]
    Unavailable(String),

    /// The payload could not be decoded
    #[error("invalid terms payload: {0}")]
    Decode(String),

    /// The source answered with an error
    #[error("terms provider error: {0}")]
    Provider(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Result alias for term fetching
pub type Result<T> = std::result::Result<T, FetchError>;
