//! Tone policy
//!
//! A static, process-wide table mapping each [`Tone`] to the style directives
//! consumed by the text, image and audio adapters. Resolution is total: any
//! unrecognised tone string yields the playful profile.

use serde::{Deserialize, Serialize};

use crate::value_objects::tone::Tone;

/// Client-side speech synthesis parameters
///
/// Values follow the Web Speech API ranges (pitch 0-2, rate 0.1-10, volume 0-1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub pitch: f32,
    pub rate: f32,
    pub volume: f32,
}

/// Style directives for one tone
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneProfile {
    pub tone: Tone,
    /// Persona given to the language model
    pub system_prompt: &'static str,
    /// Short description of the writing style
    pub text_style_directives: &'static str,
    /// Comma-separated modifiers appended to image prompts
    pub image_style_modifiers: &'static str,
    /// Rendering hint for image providers that support one (`vivid` / `natural`)
    pub image_style: &'static str,
    /// Default provider voice for server-side text-to-speech
    pub voice: &'static str,
    /// Settings for client-side speech synthesis
    pub voice_settings: VoiceSettings,
}

static PLAYFUL: ToneProfile = ToneProfile {
    tone: Tone::Playful,
    system_prompt: "You are a creative, fun-loving marketing expert who writes in an engaging, \
                    playful style. Use emojis, casual language, and exciting energy. Make \
                    everything sound fun and approachable.",
    text_style_directives: "playful, energetic, and fun with emojis",
    image_style_modifiers: "colorful, fun, cartoon, whimsical, high contrast",
    image_style: "vivid",
    voice: "nova",
    voice_settings: VoiceSettings {
        pitch: 1.3,
        rate: 1.2,
        volume: 1.0,
    },
};

static SERIOUS: ToneProfile = ToneProfile {
    tone: Tone::Serious,
    system_prompt: "You are a professional marketing strategist who writes authoritative, \
                    trustworthy content. Focus on credibility, benefits, and professional \
                    language. Be confident but not overly casual.",
    text_style_directives: "professional, authoritative, and credible",
    image_style_modifiers: "professional, clean, modern, corporate, muted colors",
    image_style: "natural",
    voice: "onyx",
    voice_settings: VoiceSettings {
        pitch: 0.8,
        rate: 0.9,
        volume: 1.0,
    },
};

static BOLD: ToneProfile = ToneProfile {
    tone: Tone::Bold,
    system_prompt: "You are a bold, confident marketing expert who writes powerful, \
                    action-oriented content. Use strong language, make confident claims, and \
                    create urgency. Be impactful and direct.",
    text_style_directives: "bold, confident, and action-oriented",
    image_style_modifiers: "dramatic, intense, bold lighting, powerful and futuristic",
    image_style: "natural",
    voice: "echo",
    voice_settings: VoiceSettings {
        pitch: 1.0,
        rate: 1.1,
        volume: 1.0,
    },
};

impl ToneProfile {
    /// Resolve any tone string to a profile, defaulting to playful
    #[must_use]
    pub fn resolve(tone: &str) -> &'static Self {
        Self::for_tone(Tone::from_str_lossy(tone))
    }

    #[must_use]
    pub fn for_tone(tone: Tone) -> &'static Self {
        match tone {
            Tone::Playful => &PLAYFUL,
            Tone::Serious => &SERIOUS,
            Tone::Bold => &BOLD,
        }
    }
}
