//! Incrementally assembled generation result

use serde::{Deserialize, Serialize};

use crate::entities::content::{AudioContent, Generated, ImageContent, TextContent};
use crate::value_objects::Modality;

/// One modality that has settled, either generated or substituted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modality", rename_all = "lowercase")]
pub enum ModalityUpdate {
    Text(Generated<TextContent>),
    Image(Generated<ImageContent>),
    Audio(Generated<AudioContent>),
}

impl ModalityUpdate {
    pub const fn modality(&self) -> Modality {
        match self {
            Self::Text(_) => Modality::Text,
            Self::Image(_) => Modality::Image,
            Self::Audio(_) => Modality::Audio,
        }
    }

    pub const fn used_fallback(&self) -> bool {
        match self {
            Self::Text(g) => g.used_fallback,
            Self::Image(g) => g.used_fallback,
            Self::Audio(g) => g.used_fallback,
        }
    }
}

/// Result of one orchestration
///
/// A `None` slot is pending. Settled slots are never failures: they hold
/// either provider output or a flagged fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub text: Option<Generated<TextContent>>,
    #[serde(default)]
    pub image: Option<Generated<ImageContent>>,
    #[serde(default)]
    pub audio: Option<Generated<AudioContent>>,
}

impl GenerationResult {
    /// A result with every modality pending
    pub fn pending() -> Self {
        Self::default()
    }

    /// Store an update in its own slot, leaving the other two untouched
    pub fn apply(&mut self, update: ModalityUpdate) {
        match update {
            ModalityUpdate::Text(text) => self.text = Some(text),
            ModalityUpdate::Image(image) => self.image = Some(image),
            ModalityUpdate::Audio(audio) => self.audio = Some(audio),
        }
    }

    #[must_use]
    pub fn with(mut self, update: ModalityUpdate) -> Self {
        self.apply(update);
        self
    }

    pub const fn is_settled(&self, modality: Modality) -> bool {
        match modality {
            Modality::Text => self.text.is_some(),
            Modality::Image => self.image.is_some(),
            Modality::Audio => self.audio.is_some(),
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.text.is_some() && self.image.is_some() && self.audio.is_some()
    }

    /// The resolved caption, if text has settled
    pub fn caption(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.content.caption.as_str())
    }

    /// Modalities that were filled by fallback content
    pub fn fallback_modalities(&self) -> Vec<Modality> {
        let mut modalities = Vec::new();
        if self.text.as_ref().is_some_and(|g| g.used_fallback) {
            modalities.push(Modality::Text);
        }
        if self.image.as_ref().is_some_and(|g| g.used_fallback) {
            modalities.push(Modality::Image);
        }
        if self.audio.as_ref().is_some_and(|g| g.used_fallback) {
            modalities.push(Modality::Audio);
        }
        modalities
    }
}
