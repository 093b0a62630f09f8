//! Speech synthesis provider implementations
//!
//! Contains concrete implementations of the `TextToSpeech` trait.

pub mod elevenlabs;
pub mod openai;

pub use elevenlabs::ElevenLabsProvider;
pub use openai::OpenAiTtsProvider;

/// Longest narration script accepted by the providers
pub(crate) const MAX_TEXT_CHARS: usize = 4096;

pub(crate) fn check_text(text: &str) -> Result<(), crate::error::SpeechError> {
    use crate::error::SpeechError;

    if text.trim().is_empty() {
        return Err(SpeechError::InvalidText(
            "Text cannot be empty".to_string(),
        ));
    }
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(SpeechError::InvalidText(format!(
            "Text too long: {chars} characters exceeds {MAX_TEXT_CHARS} limit"
        )));
    }
    Ok(())
}
