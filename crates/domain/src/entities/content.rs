//! Normalized per-modality content

use serde::{Deserialize, Serialize};

use crate::value_objects::VoiceSettings;

/// Average narration speed used for duration estimates
const WORDS_PER_MINUTE: u64 = 150;

/// Headline and caption for a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub headline: String,
    pub caption: String,
}

impl TextContent {
    pub fn new(headline: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            caption: caption.into(),
        }
    }
}

/// Hero image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    /// `http(s)` URL or `data:` URL with embedded base64 image
    pub url: String,
    /// Prompt as rewritten by the provider, when it reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageContent {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            revised_prompt: None,
        }
    }

    #[must_use]
    pub fn with_revised_prompt(mut self, revised_prompt: impl Into<String>) -> Self {
        self.revised_prompt = Some(revised_prompt.into());
        self
    }
}

/// Where the narrated audio comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioHandle {
    /// Provider URL or `data:` URL with embedded audio
    Url { url: String },
    /// The client should narrate `text` itself with these voice settings
    SpeechSynthesis {
        text: String,
        /// Short human-readable label shown instead of a player
        description: String,
        voice_settings: VoiceSettings,
    },
}

impl AudioHandle {
    /// Wire marker telling clients to use local speech synthesis
    pub const SPEECH_SYNTHESIS_MARKER: &'static str = "web-speech-ready";

    /// The value exposed as `audioURL`
    pub fn as_url(&self) -> &str {
        match self {
            Self::Url { url } => url,
            Self::SpeechSynthesis { .. } => Self::SPEECH_SYNTHESIS_MARKER,
        }
    }

    pub const fn is_speech_synthesis(&self) -> bool {
        matches!(self, Self::SpeechSynthesis { .. })
    }
}

/// Narrated audio for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioContent {
    pub handle: AudioHandle,
    /// Estimated playback length in whole seconds
    pub duration_secs: u32,
    /// Container format, or `web-speech` for client-side synthesis
    pub format: String,
}

impl AudioContent {
    pub const SPEECH_SYNTHESIS_FORMAT: &'static str = "web-speech";

    /// Audio served from a URL
    pub fn from_url(url: impl Into<String>, narration: &str, format: impl Into<String>) -> Self {
        Self {
            handle: AudioHandle::Url { url: url.into() },
            duration_secs: estimate_duration_secs(narration),
            format: format.into(),
        }
    }

    /// Client-side speech synthesis of `narration`
    pub fn speech_synthesis(
        narration: impl Into<String>,
        description: impl Into<String>,
        voice_settings: VoiceSettings,
    ) -> Self {
        let text = narration.into();
        Self {
            duration_secs: estimate_duration_secs(&text),
            handle: AudioHandle::SpeechSynthesis {
                text,
                description: description.into(),
                voice_settings,
            },
            format: Self::SPEECH_SYNTHESIS_FORMAT.to_string(),
        }
    }
}

/// Estimate narration length at 150 words per minute, never below one second
pub fn estimate_duration_secs(text: &str) -> u32 {
    let words = text.split_whitespace().count() as u64;
    // round(words * 60 / 150)
    let secs = (words * 60 * 2 + WORDS_PER_MINUTE) / (WORDS_PER_MINUTE * 2);
    u32::try_from(secs).unwrap_or(u32::MAX).max(1)
}

/// Settled content for one modality
///
/// `used_fallback` is the only trace of a provider failure; the content itself
/// is always usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated<T> {
    pub content: T,
    pub used_fallback: bool,
}

impl<T> Generated<T> {
    /// Content produced by a provider
    pub const fn generated(content: T) -> Self {
        Self {
            content,
            used_fallback: false,
        }
    }

    /// Substitute content produced locally after a provider failure
    pub const fn fallback(content: T) -> Self {
        Self {
            content,
            used_fallback: true,
        }
    }
}
