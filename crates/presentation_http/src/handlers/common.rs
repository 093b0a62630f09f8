//! Wire shapes shared by the generation handlers
//!
//! Field names follow the browser client (`imageURL`, `audioURL`,
//! `revisedPrompt`, `voiceSettings`). Each content body carries a `fallback`
//! flag instead of an error status.

use domain::{
    AudioContent, AudioHandle, Generated, GenerationRequest, GenerationResult, ImageContent,
    ModalityUpdate, TextContent, Tone, ToneProfile, VoiceSettings,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Build a domain request from wire fields
///
/// Unknown tones resolve to playful.
pub fn build_request(
    prompt: &str,
    tone: &str,
    temperature: Option<f32>,
) -> Result<GenerationRequest, ApiError> {
    let request = GenerationRequest::new(prompt, Tone::from_str_lossy(tone))?;
    Ok(match temperature {
        Some(t) => request.with_temperature(t)?,
        None => request,
    })
}

/// Read `tone` from any JSON value
///
/// Strings are kept as sent. `null`, numbers and other non-strings read as an
/// empty tone, which resolves to playful like any unknown name.
pub fn lenient_tone<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tone) => tone,
        _ => String::new(),
    })
}

/// Headline and caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextResponse {
    pub headline: String,
    pub caption: String,
    /// True when the provider failed and template copy was used
    #[serde(default)]
    pub fallback: bool,
}

impl From<Generated<TextContent>> for TextResponse {
    fn from(generated: Generated<TextContent>) -> Self {
        Self {
            headline: generated.content.headline,
            caption: generated.content.caption,
            fallback: generated.used_fallback,
        }
    }
}

impl From<TextResponse> for Generated<TextContent> {
    fn from(text: TextResponse) -> Self {
        Self {
            content: TextContent::new(text.headline, text.caption),
            used_fallback: text.fallback,
        }
    }
}

/// Hero image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageResponse {
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(
        rename = "revisedPrompt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revised_prompt: Option<String>,
    #[serde(default)]
    pub fallback: bool,
}

impl From<Generated<ImageContent>> for ImageResponse {
    fn from(generated: Generated<ImageContent>) -> Self {
        Self {
            image_url: generated.content.url,
            revised_prompt: generated.content.revised_prompt,
            fallback: generated.used_fallback,
        }
    }
}

impl From<ImageResponse> for Generated<ImageContent> {
    fn from(image: ImageResponse) -> Self {
        Self {
            content: ImageContent {
                url: image.image_url,
                revised_prompt: image.revised_prompt,
            },
            used_fallback: image.fallback,
        }
    }
}

/// Client-side speech synthesis parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VoiceSettingsDto {
    pub pitch: f32,
    pub rate: f32,
    pub volume: f32,
}

impl From<VoiceSettings> for VoiceSettingsDto {
    fn from(settings: VoiceSettings) -> Self {
        Self {
            pitch: settings.pitch,
            rate: settings.rate,
            volume: settings.volume,
        }
    }
}

impl From<VoiceSettingsDto> for VoiceSettings {
    fn from(settings: VoiceSettingsDto) -> Self {
        Self {
            pitch: settings.pitch,
            rate: settings.rate,
            volume: settings.volume,
        }
    }
}

/// Narration audio
///
/// `audioURL` is either a `data:` URL or `web-speech-ready`, in which case the
/// client narrates `text` itself using `voiceSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    #[serde(rename = "audioURL")]
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_description: Option<String>,
    /// Narration script, present for client-side synthesis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Estimated length in seconds
    pub duration: u32,
    pub format: String,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettingsDto>,
}

impl From<Generated<AudioContent>> for AudioResponse {
    fn from(generated: Generated<AudioContent>) -> Self {
        let AudioContent {
            handle,
            duration_secs,
            format,
        } = generated.content;
        let audio_url = handle.as_url().to_string();

        let (audio_description, text, voice_settings) = match handle {
            AudioHandle::Url { .. } => (None, None, None),
            AudioHandle::SpeechSynthesis {
                text,
                description,
                voice_settings,
            } => (Some(description), Some(text), Some(voice_settings.into())),
        };

        Self {
            audio_url,
            audio_description,
            text,
            duration: duration_secs,
            format,
            fallback: generated.used_fallback,
            voice_settings,
        }
    }
}

impl AudioResponse {
    /// Rebuild domain audio; missing voice settings come from `profile`
    pub fn into_generated(self, profile: &ToneProfile) -> Generated<AudioContent> {
        let handle = if self.audio_url == AudioHandle::SPEECH_SYNTHESIS_MARKER {
            AudioHandle::SpeechSynthesis {
                text: self.text.unwrap_or_default(),
                description: self.audio_description.unwrap_or_default(),
                voice_settings: self
                    .voice_settings
                    .map_or(profile.voice_settings, Into::into),
            }
        } else {
            AudioHandle::Url {
                url: self.audio_url,
            }
        };

        Generated {
            content: AudioContent {
                handle,
                duration_secs: self.duration,
                format: self.format,
            },
            used_fallback: self.fallback,
        }
    }
}

/// All three modalities; pending slots are omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioResponse>,
}

impl From<GenerationResult> for GenerationResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            text: result.text.map(Into::into),
            image: result.image.map(Into::into),
            audio: result.audio.map(Into::into),
        }
    }
}

impl GenerationResponse {
    pub fn into_result(self, profile: &ToneProfile) -> GenerationResult {
        GenerationResult {
            text: self.text.map(Into::into),
            image: self.image.map(Into::into),
            audio: self.audio.map(|audio| audio.into_generated(profile)),
        }
    }
}

/// One settled modality, as sent in an SSE `update` event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "modality", rename_all = "lowercase")]
pub enum UpdateEvent {
    Text(TextResponse),
    Image(ImageResponse),
    Audio(AudioResponse),
}

impl From<ModalityUpdate> for UpdateEvent {
    fn from(update: ModalityUpdate) -> Self {
        match update {
            ModalityUpdate::Text(text) => Self::Text(text.into()),
            ModalityUpdate::Image(image) => Self::Image(image.into()),
            ModalityUpdate::Audio(audio) => Self::Audio(audio.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_fields_use_client_names() {
        let image = ImageResponse::from(Generated::generated(
            ImageContent::new("https://x/y.png").with_revised_prompt("tidy"),
        ));
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["imageURL"], "https://x/y.png");
        assert_eq!(json["revisedPrompt"], "tidy");
        assert_eq!(json["fallback"], false);
    }

    #[test]
    fn speech_marker_carries_script_and_settings() {
        let profile = ToneProfile::for_tone(Tone::Bold);
        let audio = AudioResponse::from(Generated::fallback(AudioContent::speech_synthesis(
            "Go big today",
            "⚡ Dynamic voiceover",
            profile.voice_settings,
        )));

        let json = serde_json::to_value(&audio).unwrap();
        assert_eq!(json["audioURL"], "web-speech-ready");
        assert_eq!(json["text"], "Go big today");
        assert_eq!(json["format"], "web-speech");
        assert_eq!(json["fallback"], true);
        assert!(json["voiceSettings"]["rate"].is_number());
    }

    #[test]
    fn audio_url_omits_speech_fields() {
        let audio = AudioResponse::from(Generated::generated(AudioContent::from_url(
            "data:audio/mpeg;base64,AAAA",
            "one two",
            "mp3",
        )));
        let json = serde_json::to_value(&audio).unwrap();
        assert!(json.get("voiceSettings").is_none());
        assert!(json.get("text").is_none());
        assert_eq!(json["duration"], 1);
    }

    #[test]
    fn result_survives_the_wire() {
        let profile = ToneProfile::for_tone(Tone::Serious);
        let result = GenerationResult::pending()
            .with(ModalityUpdate::Text(Generated::generated(TextContent::new(
                "H", "C",
            ))))
            .with(ModalityUpdate::Audio(Generated::fallback(
                AudioContent::speech_synthesis("C", "desc", profile.voice_settings),
            )));

        let json = serde_json::to_value(GenerationResponse::from(result.clone())).unwrap();
        let wire: GenerationResponse = serde_json::from_value(json).unwrap();
        assert_eq!(wire.into_result(profile), result);
    }

    #[test]
    fn update_event_is_tagged() {
        let event = UpdateEvent::from(ModalityUpdate::Text(Generated::fallback(
            TextContent::new("H", "C"),
        )));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["modality"], "text");
        assert_eq!(json["headline"], "H");
    }

    #[test]
    fn unknown_tone_is_playful_and_blank_prompt_is_rejected() {
        let request = build_request("mug", "sarcastic", None).unwrap();
        assert_eq!(request.tone(), Tone::Playful);
        assert!(build_request("   ", "bold", None).is_err());
        assert!(build_request("mug", "bold", Some(2.5)).is_err());
    }
}
