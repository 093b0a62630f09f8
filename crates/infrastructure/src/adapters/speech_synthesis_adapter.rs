//! Speech adapter - Implements AudioGenerationPort using ai_speech

use std::sync::Arc;

use ai_speech::{
    ElevenLabsProvider, OpenAiTtsProvider, SpeechConfig, SpeechError, SpeechProvider,
    SynthesisOptions, TextToSpeech, config::clamp_speed,
};
use application::{
    error::ApplicationError,
    ports::{AdapterOutcome, AudioGenerationPort, Deadline},
};
use async_trait::async_trait;
use domain::{AudioContent, ToneProfile};
use secrecy::SecretString;
use tracing::{debug, instrument};

/// Narration via a server-side text-to-speech provider
pub struct SpeechSynthesisAdapter {
    provider: Option<Arc<dyn TextToSpeech>>,
}

impl std::fmt::Debug for SpeechSynthesisAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesisAdapter")
            .field(
                "model",
                &self.provider.as_ref().map(|provider| provider.model_name()),
            )
            .finish()
    }
}

impl SpeechSynthesisAdapter {
    /// Create an adapter for the configured provider
    ///
    /// Disabled speech or a missing key yields an adapter that always reports
    /// the provider as unavailable, so narration falls back to client-side
    /// synthesis.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: SpeechConfig, api_key: Option<SecretString>) -> Result<Self, ApplicationError> {
        let Some(key) = api_key.filter(|_| config.enabled) else {
            return Ok(Self { provider: None });
        };

        let map_error = |e: SpeechError| ApplicationError::Configuration(e.to_string());
        let provider: Arc<dyn TextToSpeech> = match config.provider {
            SpeechProvider::OpenAI => Arc::new(OpenAiTtsProvider::new(config, key).map_err(map_error)?),
            SpeechProvider::ElevenLabs => {
                Arc::new(ElevenLabsProvider::new(config, key).map_err(map_error)?)
            },
        };

        Ok(Self {
            provider: Some(provider),
        })
    }

    pub fn with_provider(provider: Arc<dyn TextToSpeech>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    fn map_error<T>(err: SpeechError) -> AdapterOutcome<T> {
        match err {
            SpeechError::Timeout => AdapterOutcome::Timeout,
            SpeechError::InvalidResponse(detail) => AdapterOutcome::MalformedResponse(detail),
            other => AdapterOutcome::ProviderUnavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl AudioGenerationPort for SpeechSynthesisAdapter {
    #[instrument(skip(self, narration, profile, deadline), fields(tone = %profile.tone, words = narration.split_whitespace().count()))]
    async fn generate(
        &self,
        narration: &str,
        profile: &ToneProfile,
        voice: Option<String>,
        deadline: Deadline,
    ) -> AdapterOutcome<AudioContent> {
        let Some(provider) = &self.provider else {
            return AdapterOutcome::ProviderUnavailable("speech provider not configured".into());
        };

        let options = SynthesisOptions::default()
            .with_voice(voice.unwrap_or_else(|| profile.voice.to_string()))
            .with_speed(clamp_speed(profile.voice_settings.rate));

        deadline
            .race(async {
                match provider.synthesize(narration, options).await {
                    Ok(audio) if audio.is_empty() => {
                        AdapterOutcome::MalformedResponse("empty audio body".into())
                    },
                    Ok(audio) => {
                        debug!(bytes = audio.len(), "Narration synthesized");
                        AdapterOutcome::Success(AudioContent::from_url(
                            audio.to_data_url(),
                            narration,
                            audio.format().extension(),
                        ))
                    },
                    Err(e) => Self::map_error(e),
                }
            })
            .await
    }

    fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use ai_speech::{AudioData, AudioFormat};
    use bytes::Bytes;
    use domain::{AudioHandle, Tone};

    use super::*;

    struct FakeTts {
        body: &'static [u8],
        seen: Mutex<Option<SynthesisOptions>>,
    }

    impl FakeTts {
        fn new(body: &'static [u8]) -> Arc<Self> {
            Arc::new(Self {
                body,
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextToSpeech for FakeTts {
        async fn synthesize(
            &self,
            _text: &str,
            options: SynthesisOptions,
        ) -> Result<AudioData, SpeechError> {
            *self.seen.lock().unwrap() = Some(options);
            Ok(AudioData::new(Bytes::from_static(self.body), AudioFormat::Mp3))
        }

        fn model_name(&self) -> &str {
            "fake"
        }

        fn default_voice(&self) -> &str {
            "alloy"
        }
    }

    fn deadline() -> Deadline {
        Deadline::new(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn returns_data_url_with_profile_voice() {
        let tts = FakeTts::new(b"ID3audio");
        let adapter = SpeechSynthesisAdapter::with_provider(tts.clone());
        let profile = ToneProfile::for_tone(Tone::Serious);

        let audio = adapter
            .generate("one two three", profile, None, deadline())
            .await
            .success()
            .unwrap();

        assert!(matches!(&audio.handle, AudioHandle::Url { url } if url.starts_with("data:audio/mpeg;base64,")));
        assert_eq!(audio.format, "mp3");
        assert_eq!(audio.duration_secs, 1);

        let options = tts.seen.lock().unwrap().clone().unwrap();
        assert_eq!(options.voice.as_deref(), Some(profile.voice));
        assert_eq!(options.speed, Some(clamp_speed(profile.voice_settings.rate)));
    }

    #[tokio::test]
    async fn voice_override_wins() {
        let tts = FakeTts::new(b"ID3audio");
        let adapter = SpeechSynthesisAdapter::with_provider(tts.clone());

        adapter
            .generate("hi", ToneProfile::for_tone(Tone::Bold), Some("nova".into()), deadline())
            .await;

        let options = tts.seen.lock().unwrap().clone().unwrap();
        assert_eq!(options.voice.as_deref(), Some("nova"));
    }

    #[tokio::test]
    async fn empty_body_is_malformed() {
        let adapter = SpeechSynthesisAdapter::with_provider(FakeTts::new(b""));
        let outcome = adapter
            .generate("hi", ToneProfile::for_tone(Tone::Playful), None, deadline())
            .await;
        assert!(matches!(outcome, AdapterOutcome::MalformedResponse(_)));
    }

    #[test]
    fn disabled_speech_builds_unconfigured_adapter() {
        let config = SpeechConfig {
            enabled: false,
            ..SpeechConfig::default()
        };
        let adapter = SpeechSynthesisAdapter::new(config, Some("sk".into())).unwrap();
        assert!(!adapter.is_configured());
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            SpeechSynthesisAdapter::map_error::<()>(SpeechError::Timeout),
            AdapterOutcome::Timeout
        ));
        assert!(matches!(
            SpeechSynthesisAdapter::map_error::<()>(SpeechError::Unauthorized),
            AdapterOutcome::ProviderUnavailable(_)
        ));
        assert!(matches!(
            SpeechSynthesisAdapter::map_error::<()>(SpeechError::InvalidResponse("x".into())),
            AdapterOutcome::MalformedResponse(_)
        ));
    }
}
