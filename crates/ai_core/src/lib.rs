//! AI Core - Text and image generation clients
//!
//! Provides thin clients for OpenAI-compatible chat completion servers (Groq,
//! OpenAI, local gateways) and for image generation services (OpenAI images,
//! Stability AI). Callers own retries and fallbacks; every method here issues
//! exactly one HTTP request.

pub mod chat;
pub mod config;
pub mod error;
pub mod image;
pub mod ports;

pub use chat::OpenAiCompatibleEngine;
pub use config::{ImageConfig, ImageProvider, InferenceConfig};
pub use error::InferenceError;
pub use image::{OpenAiImageEngine, StabilityImageEngine};
pub use ports::{
    GeneratedImage, ImageEngine, ImageRequest, InferenceEngine, InferenceMessage,
    InferenceRequest, InferenceResponse, TokenUsage,
};
