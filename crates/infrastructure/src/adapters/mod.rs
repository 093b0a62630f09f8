//! Infrastructure adapters
//!
//! Adapters connect application ports to the provider clients in `ai_core`
//! and `ai_speech`.

mod content_parser;
mod image_generation_adapter;
mod speech_synthesis_adapter;
mod text_generation_adapter;

use ai_core::InferenceError;
use application::ports::AdapterOutcome;

pub use content_parser::parse_text_content;
pub use image_generation_adapter::ImageGenerationAdapter;
pub use speech_synthesis_adapter::SpeechSynthesisAdapter;
pub use text_generation_adapter::TextGenerationAdapter;

/// Classify a text or image client error
fn map_inference_error<T>(err: InferenceError) -> AdapterOutcome<T> {
    match err {
        InferenceError::Timeout => AdapterOutcome::Timeout,
        InferenceError::InvalidResponse(detail) => AdapterOutcome::MalformedResponse(detail),
        other => AdapterOutcome::ProviderUnavailable(other.to_string()),
    }
}
