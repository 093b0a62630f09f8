//! Types for speech synthesis

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Supported output audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    #[default]
    Mp3,
    /// Opus codec in an Ogg container
    Opus,
    /// AAC format
    Aac,
    /// FLAC format (lossless)
    Flac,
    /// WAV format (uncompressed)
    Wav,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/ogg",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
        }
    }
}

/// Encoded audio returned by a provider
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Bytes,
    format: AudioFormat,
}

impl AudioData {
    #[must_use]
    pub const fn new(data: Bytes, format: AudioFormat) -> Self {
        Self { data, format }
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode as a `data:` URL a browser can play directly
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_types() {
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Opus.mime_type(), "audio/ogg");
        assert_eq!(AudioFormat::Wav.extension(), "wav");
    }

    #[test]
    fn data_url_encodes_base64() {
        let audio = AudioData::new(Bytes::from_static(b"abc"), AudioFormat::Mp3);
        assert_eq!(audio.to_data_url(), "data:audio/mpeg;base64,YWJj");
        assert_eq!(audio.len(), 3);
        assert!(!audio.is_empty());
    }

    #[test]
    fn format_serializes_lowercase() {
        let json = serde_json::to_string(&AudioFormat::Flac).unwrap();
        assert_eq!(json, "\"flac\"");
    }
}
