//! Configuration for speech synthesis

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Supported speed range of server-side TTS
pub const SPEED_RANGE: std::ops::RangeInclusive<f32> = 0.25..=4.0;

/// Configuration for text-to-speech services
///
/// API keys are supplied to providers separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// When false, audio always falls back to client-side speech synthesis
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Speech provider to use
    #[serde(default)]
    pub provider: SpeechProvider,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// ElevenLabs API base URL
    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,

    /// OpenAI text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// ElevenLabs model id
    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,

    /// Default voice for TTS
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Output audio format for TTS
    #[serde(default)]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Default speaking speed (0.25 to 4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,
}

/// Speech provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// OpenAI TTS
    #[default]
    OpenAI,
    /// ElevenLabs TTS
    ElevenLabs,
}

const fn default_enabled() -> bool {
    true
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_voice() -> String {
    "nova".to_string()
}

const fn default_timeout_ms() -> u64 {
    45_000
}

const fn default_speed() -> f32 {
    1.0
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: SpeechProvider::default(),
            openai_base_url: default_openai_base_url(),
            elevenlabs_base_url: default_elevenlabs_base_url(),
            tts_model: default_tts_model(),
            elevenlabs_model: default_elevenlabs_model(),
            default_voice: default_voice(),
            output_format: AudioFormat::default(),
            timeout_ms: default_timeout_ms(),
            speed: default_speed(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !SPEED_RANGE.contains(&self.speed) {
            return Err(format!(
                "Speed must be between 0.25 and 4.0, got {}",
                self.speed
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.default_voice.trim().is_empty() {
            return Err("Default voice must not be empty".to_string());
        }

        Ok(())
    }
}

/// Clamp a requested speaking speed into the provider range
#[must_use]
pub fn clamp_speed(speed: f32) -> f32 {
    speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
}
