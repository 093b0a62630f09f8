//! Speech synthesis errors

use thiserror::Error;

/// Errors returned by speech providers
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Connection refused, reset, or any other transport problem
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Speech synthesis timeout")]
    Timeout,

    /// Credentials were rejected
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Non-2xx answer not covered by a more specific variant
    #[error("Provider rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// 2xx answer without usable audio
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Narration script was blank or too long; no request was sent
    #[error("Invalid text: {0}")]
    InvalidText(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Classify a non-2xx status shared by all providers
    ///
    /// `voice` is reported on 404, which both providers use for unknown voices.
    pub fn from_status(status: u16, voice: &str, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::VoiceNotFound(voice.to_string()),
            429 => Self::RateLimited,
            _ => Self::Rejected {
                status,
                message: message.into(),
            },
        }
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}
