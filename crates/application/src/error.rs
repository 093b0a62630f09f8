//! Application-level errors
//!
//! Provider failures never surface here; they are absorbed by the fallback
//! resolver. What remains are invalid inputs and wiring problems.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the caller sent something invalid
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
