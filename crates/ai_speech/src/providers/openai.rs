//! OpenAI TTS provider
//!
//! Implements `TextToSpeech` using `POST {base}/audio/speech`.
//! Supported output formats: mp3, opus, aac, flac, wav.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::check_text;
use crate::config::{SpeechConfig, clamp_speed};
use crate::error::SpeechError;
use crate::ports::{SynthesisOptions, TextToSpeech};
use crate::types::{AudioData, AudioFormat};

/// OpenAI text-to-speech provider
pub struct OpenAiTtsProvider {
    client: Client,
    config: SpeechConfig,
    api_key: SecretString,
}

impl fmt::Debug for OpenAiTtsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiTtsProvider")
            .field("base_url", &self.config.openai_base_url)
            .field("model", &self.config.tts_model)
            .finish_non_exhaustive()
    }
}

impl OpenAiTtsProvider {
    /// Create a new OpenAI TTS provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig, api_key: SecretString) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            base_url = %config.openai_base_url,
            model = %config.tts_model,
            "Initialized OpenAI TTS provider"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Build the TTS endpoint URL
    fn tts_url(&self) -> String {
        format!(
            "{}/audio/speech",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }

    /// Convert AudioFormat to OpenAI TTS response format string
    const fn response_format(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
            AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
        }
    }
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

/// OpenAI API error envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[async_trait]
impl TextToSpeech for OpenAiTtsProvider {
    #[instrument(skip(self, text, options), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        options: SynthesisOptions,
    ) -> Result<AudioData, SpeechError> {
        check_text(text)?;

        let voice = options
            .voice
            .as_deref()
            .unwrap_or(&self.config.default_voice);
        let speed = clamp_speed(options.speed.unwrap_or(self.config.speed));
        let format = self.config.output_format;

        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: Self::response_format(format),
            speed: if (speed - 1.0).abs() < f32::EPSILON {
                None
            } else {
                Some(speed)
            },
        };

        debug!(voice, "Synthesizing speech with OpenAI TTS");

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, "OpenAI TTS request failed");

            // OpenAI reports bad voices as 400 with a code, not 404
            let api_error = serde_json::from_str::<ApiError>(&error_body).ok();
            return Err(match api_error {
                Some(e) if e.error.code.as_deref() == Some("invalid_voice") => {
                    SpeechError::VoiceNotFound(voice.to_string())
                },
                Some(e) if e.error.code.as_deref() == Some("rate_limit_exceeded") => {
                    SpeechError::RateLimited
                },
                Some(e) => SpeechError::from_status(status.as_u16(), voice, e.error.message),
                None => SpeechError::from_status(status.as_u16(), voice, error_body),
            });
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Provider returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        Ok(AudioData::new(audio_bytes, format))
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
