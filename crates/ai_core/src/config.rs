//! Configuration for text and image providers
//!
//! API keys are not part of these structs; they are passed to engine
//! constructors separately so configs can be logged and serialized freely.

use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible chat completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL including the API version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Ask the provider for a JSON object response
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

const fn default_timeout_ms() -> u64 {
    15_000
}

const fn default_max_tokens() -> u32 {
    300
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_json_mode() -> bool {
    true
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            json_mode: default_json_mode(),
        }
    }
}

impl InferenceConfig {
    /// Configuration for OpenAI's own chat endpoint
    pub fn openai() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            ..Default::default()
        }
    }
}

/// Image generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageProvider {
    /// OpenAI images API (DALL-E)
    #[default]
    OpenAi,
    /// Stability AI text-to-image
    Stability,
}

/// Configuration for image generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Which backend to call
    #[serde(default)]
    pub provider: ImageProvider,

    /// Base URL of the OpenAI-compatible images API
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Base URL of the Stability API
    #[serde(default = "default_stability_base_url")]
    pub stability_base_url: String,

    /// Model for the OpenAI images API
    #[serde(default = "default_image_model")]
    pub model: String,

    /// Stability engine identifier
    #[serde(default = "default_stability_engine")]
    pub stability_engine: String,

    /// Image size as `WIDTHxHEIGHT`
    #[serde(default = "default_size")]
    pub size: String,

    /// Rendering quality (`standard` or `hd`)
    #[serde(default = "default_quality")]
    pub quality: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_image_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stability_base_url() -> String {
    "https://api.stability.ai".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_stability_engine() -> String {
    "stable-diffusion-xl-1024-v1-0".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_quality() -> String {
    "standard".to_string()
}

const fn default_image_timeout_ms() -> u64 {
    60_000
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: ImageProvider::default(),
            openai_base_url: default_openai_base_url(),
            stability_base_url: default_stability_base_url(),
            model: default_image_model(),
            stability_engine: default_stability_engine(),
            size: default_size(),
            quality: default_quality(),
            timeout_ms: default_image_timeout_ms(),
        }
    }
}

impl ImageConfig {
    /// Parse `size` into width and height, defaulting to 1024x1024
    pub fn dimensions(&self) -> (u32, u32) {
        self.size
            .split_once('x')
            .and_then(|(w, h)| Some((w.trim().parse().ok()?, h.trim().parse().ok()?)))
            .unwrap_or((1024, 1024))
    }
}
