//! Generation request entity

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::{Tone, ToneProfile};

/// Sampling temperature used when the caller does not pick one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A validated request to generate content for one product prompt
///
/// Immutable once constructed; a regenerate action reuses the same request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    prompt: String,
    tone: Tone,
    temperature: f32,
}

impl GenerationRequest {
    /// Create a request, trimming the prompt
    ///
    /// Fails when the prompt is empty after trimming.
    pub fn new(prompt: impl Into<String>, tone: Tone) -> Result<Self, DomainError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self {
            prompt,
            tone,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Override the sampling temperature (0.0 to 2.0)
    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, DomainError> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(DomainError::ValidationError(format!(
                "temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub const fn tone(&self) -> Tone {
        self.tone
    }

    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn profile(&self) -> &'static ToneProfile {
        self.tone.profile()
    }

    /// Narration text used when no caption has been resolved yet
    pub fn placeholder_caption(&self) -> String {
        format!("Experience {} with our {} approach.", self.prompt, self.tone)
    }
}
