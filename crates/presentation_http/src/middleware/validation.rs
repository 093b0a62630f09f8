//! Validated JSON bodies
//!
//! [`ValidatedJson`] deserializes with axum's `Json` and then runs the
//! `validator` rules on the result. Every rejection is a 400 with the same
//! body shape as [`crate::error::ErrorResponse`].

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ValidationError {
    const fn code(&self) -> &'static str {
        match self {
            Self::JsonError(_) => "invalid_json",
            Self::ValidationFailed(_) => "validation_error",
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let code = self.code().to_string();
        let (error, details) = match self {
            Self::JsonError(e) => ("Invalid JSON body", e.body_text()),
            Self::ValidationFailed(msg) => ("Validation failed", msg),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            code,
            details: Some(details),
        };

        // Malformed bodies are 400 regardless of axum's own 415/422 choice
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Flatten field errors into `field: message` pairs
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;
        Ok(Self(value))
    }
}
