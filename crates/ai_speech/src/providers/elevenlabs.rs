//! ElevenLabs TTS provider
//!
//! Implements `TextToSpeech` using `POST {base}/v1/text-to-speech/{voice_id}`
//! with `xi-api-key` authentication. ElevenLabs always returns MP3 here.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::check_text;
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SynthesisOptions, TextToSpeech};
use crate::types::{AudioData, AudioFormat};

/// Voice aliases accepted in place of raw ElevenLabs voice ids
const VOICE_ALIASES: &[(&str, &str)] = &[
    ("cheerful", "pNInz6obpgDQGcFmaJgB"),
    ("nova", "pNInz6obpgDQGcFmaJgB"),
    ("professional", "21m00Tcm4TlvDq8ikWAM"),
    ("onyx", "21m00Tcm4TlvDq8ikWAM"),
    ("confident", "AZnzlk1XvdvUeBnXmlld"),
    ("echo", "AZnzlk1XvdvUeBnXmlld"),
];

/// ElevenLabs text-to-speech provider
pub struct ElevenLabsProvider {
    client: Client,
    config: SpeechConfig,
    api_key: SecretString,
}

impl fmt::Debug for ElevenLabsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevenLabsProvider")
            .field("base_url", &self.config.elevenlabs_base_url)
            .field("model", &self.config.elevenlabs_model)
            .finish_non_exhaustive()
    }
}

impl ElevenLabsProvider {
    pub fn new(config: SpeechConfig, api_key: SecretString) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            base_url = %config.elevenlabs_base_url,
            model = %config.elevenlabs_model,
            "Initialized ElevenLabs TTS provider"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Map a voice alias to its ElevenLabs id; unknown values pass through
    fn voice_id(voice: &str) -> &str {
        VOICE_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(voice))
            .map_or(voice, |(_, id)| *id)
    }

    fn tts_url(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{voice_id}",
            self.config.elevenlabs_base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: ElevenLabsVoiceSettings,
}

#[derive(Debug, Serialize)]
struct ElevenLabsVoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for ElevenLabsVoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
            style: 0.5,
            use_speaker_boost: true,
        }
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsProvider {
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
        let voice_id = Self::voice_id(voice);

        let request = ElevenLabsRequest {
            text,
            model_id: &self.config.elevenlabs_model,
            voice_settings: ElevenLabsVoiceSettings::default(),
        };

        debug!(voice_id, "Synthesizing speech with ElevenLabs");

        let response = self
            .client
            .post(self.tts_url(voice_id))
            .header("xi-api-key", self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, "ElevenLabs request failed");
            return Err(SpeechError::from_status(
                status.as_u16(),
                voice_id,
                error_body,
            ));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Provider returned no audio".to_string(),
            ));
        }

        Ok(AudioData::new(audio_bytes, AudioFormat::Mp3))
    }

    fn model_name(&self) -> &str {
        &self.config.elevenlabs_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
