//! Tone value object

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;
use crate::value_objects::tone_profile::ToneProfile;

/// Stylistic axis applied uniformly to text, image and audio generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Fun, energetic, emoji-friendly
    #[default]
    Playful,
    /// Professional and authoritative
    Serious,
    /// Confident and action-oriented
    Bold,
}

impl Tone {
    /// Every supported tone, in display order
    pub const ALL: [Self; 3] = [Self::Playful, Self::Serious, Self::Bold];

    /// Parse a tone leniently
    ///
    /// Matching ignores case and surrounding whitespace. Anything that is not
    /// a known tone name resolves to [`Tone::Playful`].
    #[must_use]
    pub fn from_str_lossy(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playful => "playful",
            Self::Serious => "serious",
            Self::Bold => "bold",
        }
    }

    /// The static style profile for this tone
    #[must_use]
    pub fn profile(self) -> &'static ToneProfile {
        ToneProfile::for_tone(self)
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playful" => Ok(Self::Playful),
            "serious" => Ok(Self::Serious),
            "bold" => Ok(Self::Bold),
            other => Err(DomainError::ValidationError(format!(
                "unknown tone '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
