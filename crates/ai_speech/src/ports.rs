//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that text-to-speech adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::AudioData;

/// Per-call synthesis options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisOptions {
    /// Provider voice name or id (provider default if `None`)
    pub voice: Option<String>,
    /// Speaking speed multiplier (provider default if `None`)
    pub speed: Option<f32>,
}

impl SynthesisOptions {
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the text is empty or too long, the provider
    /// rejects the request, or the response carries no audio.
    async fn synthesize(
        &self,
        text: &str,
        options: SynthesisOptions,
    ) -> Result<AudioData, SpeechError>;

    /// Get the name of the current TTS model
    fn model_name(&self) -> &str;

    /// Get the default voice ID
    fn default_voice(&self) -> &str;
}
