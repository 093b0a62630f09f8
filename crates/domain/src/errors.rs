//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// The product prompt was empty or whitespace only
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    /// Unknown generation modality
    #[error("Unknown modality: {0}")]
    UnknownModality(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
