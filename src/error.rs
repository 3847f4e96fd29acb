//! Error types for talking to the user backend
use thiserror::Error;

use crate::models::UserId;

/// Errors returned by a backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    #[error("Request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("Backend responded with status {0}")]
    Status(u16),

    /// The response body was not what the endpoint promises
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// Errors raised by the directory controller itself
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No user with id {0} in the current list")]
    UnknownRecord(UserId),

    #[error("Unknown form field: {0}")]
    InvalidField(String),
}
