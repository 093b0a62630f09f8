//! Generation modality

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// One of the three independently generated artefacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Headline and caption
    Text,
    /// Hero image
    Image,
    /// Narrated audio
    Audio,
}

impl Modality {
    pub const ALL: [Self; 3] = [Self::Text, Self::Image, Self::Audio];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl FromStr for Modality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "audio" => Ok(Self::Audio),
            _ => Err(DomainError::UnknownModality(s.to_string())),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
