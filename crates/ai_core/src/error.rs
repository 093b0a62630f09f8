//! Provider errors

use thiserror::Error;

/// Errors that can occur while talking to a generation provider
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Response parsing failed or required fields were missing
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout waiting for the provider
    #[error("Provider timeout")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Provider returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),
}

impl InferenceError {
    /// Map a non-success HTTP status and body to an error
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Unauthorized(format!("Status {status}")),
            429 => Self::RateLimited,
            _ => Self::ServerError(format!("Status {status}: {body}")),
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
