//! Fallback resolution
//!
//! The only place where a failed [`AdapterOutcome`] becomes usable content.
//! Every function here is total and deterministic: the same outcome kind,
//! prompt and tone always produce the same substitute, and nothing touches
//! the network. The failure cause is logged and never copied into content.

use domain::{
    AudioContent, Generated, ImageContent, ModalityUpdate, TextContent, Tone, ToneProfile,
};
use tracing::warn;

use crate::ports::AdapterOutcome;
use crate::services::prompt_builder::DEFAULT_SUBJECT;

/// Characters of narration quoted in a speech-synthesis description
const DESCRIPTION_EXCERPT_CHARS: usize = 50;

/// An adapter outcome tagged with its modality
#[derive(Debug, Clone, PartialEq)]
pub enum ModalityOutcome {
    Text(AdapterOutcome<TextContent>),
    Image(AdapterOutcome<ImageContent>),
    Audio(AdapterOutcome<AudioContent>),
}

/// Settle any modality's outcome
///
/// `subject` is the product prompt for text and image, and the narration text
/// for audio.
pub fn resolve(outcome: ModalityOutcome, subject: &str, profile: &ToneProfile) -> ModalityUpdate {
    match outcome {
        ModalityOutcome::Text(outcome) => {
            ModalityUpdate::Text(resolve_text(outcome, subject, profile))
        },
        ModalityOutcome::Image(outcome) => {
            ModalityUpdate::Image(resolve_image(outcome, subject, profile))
        },
        ModalityOutcome::Audio(outcome) => {
            ModalityUpdate::Audio(resolve_audio(outcome, subject, profile))
        },
    }
}

pub fn resolve_text(
    outcome: AdapterOutcome<TextContent>,
    prompt: &str,
    profile: &ToneProfile,
) -> Generated<TextContent> {
    match outcome {
        AdapterOutcome::Success(content) => Generated::generated(content),
        failure => {
            warn!(modality = "text", tone = %profile.tone, cause = %failure, "Using fallback text");
            Generated::fallback(fallback_text(prompt, profile.tone))
        },
    }
}

pub fn resolve_image(
    outcome: AdapterOutcome<ImageContent>,
    prompt: &str,
    profile: &ToneProfile,
) -> Generated<ImageContent> {
    match outcome {
        AdapterOutcome::Success(content) => Generated::generated(content),
        failure => {
            warn!(modality = "image", tone = %profile.tone, cause = %failure, "Using fallback image");
            Generated::fallback(fallback_image(prompt, profile.tone))
        },
    }
}

pub fn resolve_audio(
    outcome: AdapterOutcome<AudioContent>,
    narration: &str,
    profile: &ToneProfile,
) -> Generated<AudioContent> {
    match outcome {
        AdapterOutcome::Success(content) => Generated::generated(content),
        failure => {
            warn!(
                modality = "audio",
                tone = %profile.tone,
                cause = %failure,
                "Falling back to client-side speech synthesis"
            );
            Generated::fallback(fallback_audio(narration, profile))
        },
    }
}

/// Canned headline and caption for `prompt`
#[must_use]
pub fn fallback_text(prompt: &str, tone: Tone) -> TextContent {
    let p = subject_or_default(prompt);
    match tone {
        Tone::Playful => TextContent::new(
            format!("🎉 Amazing {p} Just Dropped!"),
            format!(
                "Get ready for the most fun {p} experience ever! 🚀 This is going to change \
                 everything!"
            ),
        ),
        Tone::Serious => TextContent::new(
            format!("Professional {p} Solution"),
            format!(
                "Discover the reliable, industry-leading {p} that delivers proven results for \
                 your business."
            ),
        ),
        Tone::Bold => TextContent::new(
            format!("Revolutionary {p} Changes Everything"),
            format!(
                "The most powerful {p} solution available. Don't settle for less. Demand \
                 excellence."
            ),
        ),
    }
}

/// Stock photo matched on prompt keywords, or the tone's generic photo
#[must_use]
pub fn fallback_image(prompt: &str, tone: Tone) -> ImageContent {
    let keywords = prompt.to_lowercase();
    let set = STOCK_IMAGES
        .iter()
        .find(|set| set.keywords.iter().any(|k| keywords.contains(k)))
        .unwrap_or(&GENERIC_IMAGES);
    ImageContent::new(set.for_tone(tone))
}

/// Speech-synthesis marker narrating `narration` with the tone's voice
#[must_use]
pub fn fallback_audio(narration: &str, profile: &ToneProfile) -> AudioContent {
    let narration = subject_or_default(narration);
    AudioContent::speech_synthesis(
        narration,
        speech_description(narration, profile.tone),
        profile.voice_settings,
    )
}

/// Human-readable label shown in place of an audio player
#[must_use]
pub fn speech_description(narration: &str, tone: Tone) -> String {
    let mut excerpt: String = narration.chars().take(DESCRIPTION_EXCERPT_CHARS).collect();
    if narration.chars().count() > DESCRIPTION_EXCERPT_CHARS {
        excerpt.push_str("...");
    }
    match tone {
        Tone::Playful => format!("🎵 Cheerful TTS: \"{excerpt}\""),
        Tone::Serious => format!("🎙️ Professional narration: \"{excerpt}\""),
        Tone::Bold => format!("⚡ Dynamic voiceover: \"{excerpt}\""),
    }
}

fn subject_or_default(subject: &str) -> &str {
    let subject = subject.trim();
    if subject.is_empty() {
        DEFAULT_SUBJECT
    } else {
        subject
    }
}

struct StockImageSet {
    keywords: &'static [&'static str],
    playful: &'static str,
    serious: &'static str,
    bold: &'static str,
}

impl StockImageSet {
    const fn for_tone(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Playful => self.playful,
            Tone::Serious => self.serious,
            Tone::Bold => self.bold,
        }
    }
}

macro_rules! unsplash {
    ($id:literal) => {
        concat!(
            "https://images.unsplash.com/photo-",
            $id,
            "?auto=format&fit=crop&w=800&q=80"
        )
    };
}

/// Checked in order; the first set with a matching keyword wins
static STOCK_IMAGES: [StockImageSet; 7] = [
    StockImageSet {
        keywords: &["coffee", "cafe", "latte"],
        playful: unsplash!("1509042239860-f550ce710b93"),
        serious: unsplash!("1447933601403-0c6688de566e"),
        bold: unsplash!("1514432324607-a09d9b4aefdd"),
    },
    StockImageSet {
        keywords: &["tech", "app", "software", "digital"],
        playful: unsplash!("1555774698-0b77e0d5fac6"),
        serious: unsplash!("1486312338219-ce68d2c6f44d"),
        bold: unsplash!("1518709268805-4e9042af2176"),
    },
    StockImageSet {
        keywords: &["food", "restaurant", "meal", "recipe"],
        playful: unsplash!("1565299624946-b28f40a0ca4b"),
        serious: unsplash!("1540189549336-e6e99c3679fe"),
        bold: unsplash!("1565958011703-44f9829ba187"),
    },
    StockImageSet {
        keywords: &["fitness", "gym", "workout", "health"],
        playful: unsplash!("1571019613454-1cb2f99b2d8b"),
        serious: unsplash!("1534438327276-14e5300c3a48"),
        bold: unsplash!("1581009146145-b5ef050c2e1e"),
    },
    StockImageSet {
        keywords: &["travel", "vacation", "trip", "adventure"],
        playful: unsplash!("1488646953014-85cb44e25828"),
        serious: unsplash!("1469474968028-56623f02e42e"),
        bold: unsplash!("1506905925346-21bda4d32df4"),
    },
    StockImageSet {
        keywords: &["fashion", "style", "clothing", "outfit"],
        playful: unsplash!("1445205170230-053b83016050"),
        serious: unsplash!("1441986300917-64674bd600d8"),
        bold: unsplash!("1515372039744-b8f02a3ae446"),
    },
    StockImageSet {
        keywords: &["business", "professional", "corporate"],
        playful: unsplash!("1600880292203-757bb62b4baf"),
        serious: unsplash!("1507003211169-0a1dd7228f2d"),
        bold: unsplash!("1556761175-b413da4baf72"),
    },
];

static GENERIC_IMAGES: StockImageSet = StockImageSet {
    keywords: &[],
    playful: unsplash!("1513475382585-d06e58bcb0e0"),
    serious: unsplash!("1486312338219-ce68d2c6f44d"),
    bold: unsplash!("1518709268805-4e9042af2176"),
};
