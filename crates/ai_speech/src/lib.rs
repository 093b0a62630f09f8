//! AI Speech - Text-to-Speech abstractions
//!
//! Provides the [`TextToSpeech`] port and concrete providers that turn a
//! narration script into encoded audio.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - OpenAI TTS API (`/audio/speech`)
//! - ElevenLabs (`/v1/text-to-speech/{voice_id}`)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{OpenAiTtsProvider, SpeechConfig, SynthesisOptions, TextToSpeech};
//!
//! let provider = OpenAiTtsProvider::new(SpeechConfig::default(), api_key)?;
//! let audio = provider
//!     .synthesize("Meet the bottle that talks back.", SynthesisOptions::default())
//!     .await?;
//! let url = audio.to_data_url();
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{SpeechConfig, SpeechProvider};
pub use error::SpeechError;
pub use ports::{SynthesisOptions, TextToSpeech};
pub use providers::elevenlabs::ElevenLabsProvider;
pub use providers::openai::OpenAiTtsProvider;
pub use types::{AudioData, AudioFormat};
