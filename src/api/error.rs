//! Error types for the school API client.

use thiserror::Error;

/// Errors that can occur while talking to the attendance service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// No API URL was configured
    #[error("School API is not configured")]
    NotConfigured,

    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Server answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not valid JSON
    #[error("Could not decode response: {message}")]
    Decode { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode { message: err.to_string() }
        } else {
            ApiError::Network { message: err.to_string() }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode { message: err.to_string() }
    }
}
