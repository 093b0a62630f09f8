//! Provider credentials.

use std::fmt;

use ai_core::{ImageProvider, InferenceConfig};
use ai_speech::SpeechProvider;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// API keys for the upstream providers
///
/// Keys are never serialized and are redacted in debug output.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    /// Groq (OpenAI-compatible chat completions)
    #[serde(default, skip_serializing)]
    pub groq: Option<SecretString>,

    /// OpenAI (chat, images, speech)
    #[serde(default, skip_serializing)]
    pub openai: Option<SecretString>,

    /// Stability AI (images)
    #[serde(default, skip_serializing)]
    pub stability: Option<SecretString>,

    /// ElevenLabs (speech)
    #[serde(default, skip_serializing)]
    pub elevenlabs: Option<SecretString>,
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<SecretString>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ApiKeys")
            .field("groq", &redact(&self.groq))
            .field("openai", &redact(&self.openai))
            .field("stability", &redact(&self.stability))
            .field("elevenlabs", &redact(&self.elevenlabs))
            .finish()
    }
}

fn present(key: Option<&SecretString>) -> Option<SecretString> {
    key.filter(|k| !k.expose_secret().trim().is_empty()).cloned()
}

impl ApiKeys {
    /// Key for the chat completion endpoint
    ///
    /// Groq is preferred. The OpenAI key is only used when the endpoint is
    /// OpenAI itself.
    #[must_use]
    pub fn text_key(&self, text: &InferenceConfig) -> Option<SecretString> {
        present(self.groq.as_ref()).or_else(|| {
            text.base_url
                .contains("api.openai.com")
                .then(|| present(self.openai.as_ref()))
                .flatten()
        })
    }

    /// Key for the configured image backend
    #[must_use]
    pub fn image_key(&self, provider: ImageProvider) -> Option<SecretString> {
        match provider {
            ImageProvider::OpenAi => present(self.openai.as_ref()),
            ImageProvider::Stability => present(self.stability.as_ref()),
        }
    }

    /// Key for the configured speech backend
    #[must_use]
    pub fn speech_key(&self, provider: SpeechProvider) -> Option<SecretString> {
        match provider {
            SpeechProvider::OpenAI => present(self.openai.as_ref()),
            SpeechProvider::ElevenLabs => present(self.elevenlabs.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> ApiKeys {
        ApiKeys {
            groq: None,
            openai: Some("sk-openai".into()),
            stability: Some("".into()),
            elevenlabs: Some("el-key".into()),
        }
    }

    #[test]
    fn openai_key_only_serves_openai_chat_endpoint() {
        let keys = keys();
        assert!(keys.text_key(&InferenceConfig::default()).is_none());
        assert!(keys.text_key(&InferenceConfig::openai()).is_some());
    }

    #[test]
    fn groq_key_wins_for_text() {
        let keys = ApiKeys {
            groq: Some("gsk".into()),
            ..keys()
        };
        let key = keys.text_key(&InferenceConfig::openai()).unwrap();
        assert_eq!(key.expose_secret(), "gsk");
    }

    #[test]
    fn empty_keys_count_as_missing() {
        assert!(keys().image_key(ImageProvider::Stability).is_none());
        assert!(keys().image_key(ImageProvider::OpenAi).is_some());
    }

    #[test]
    fn speech_key_follows_provider() {
        let keys = keys();
        assert_eq!(
            keys.speech_key(SpeechProvider::ElevenLabs)
                .unwrap()
                .expose_secret(),
            "el-key"
        );
        assert_eq!(
            keys.speech_key(SpeechProvider::OpenAI)
                .unwrap()
                .expose_secret(),
            "sk-openai"
        );
    }

    #[test]
    fn debug_redacts_values() {
        let debug = format!("{:?}", keys());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-openai"));
        assert!(debug.contains("groq: None"));
    }
}
