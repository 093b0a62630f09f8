//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `generation`: per-modality time budgets
//! - `keys`: provider credentials
//!
//! Provider client settings reuse the `ai_core` and `ai_speech` config types.
//! Sources are layered: struct defaults, then an optional `config.toml`, then
//! `TONECRAFT__*` environment variables, then the conventional provider key
//! variables (`GROQ_API_KEY`, `OPENAI_API_KEY`, `STABILITY_API_KEY`,
//! `ELEVENLABS_API_KEY`).

mod generation;
mod keys;
mod server;

use ai_core::{ImageConfig, InferenceConfig};
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

pub use generation::GenerationConfig;
pub use keys::ApiKeys;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of structured environment overrides
pub const ENV_PREFIX: &str = "TONECRAFT";

/// Separator between prefix and nested keys (`TONECRAFT__SERVER__PORT`)
pub const ENV_SEPARATOR: &str = "__";

/// Conventional provider variables and the config key each one overrides
const PROVIDER_KEY_VARS: [(&str, &str); 4] = [
    ("GROQ_API_KEY", "api_keys.groq"),
    ("OPENAI_API_KEY", "api_keys.openai"),
    ("STABILITY_API_KEY", "api_keys.stability"),
    ("ELEVENLABS_API_KEY", "api_keys.elevenlabs"),
];

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Text provider (OpenAI-compatible chat completions)
    #[serde(default)]
    pub text: InferenceConfig,

    /// Image provider
    #[serde(default)]
    pub image: ImageConfig,

    /// Text-to-speech provider
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Per-modality time budgets
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Provider credentials (never serialized)
    #[serde(default)]
    pub api_keys: ApiKeys,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::File::with_name("config").required(false), None)
    }

    /// Load configuration from an explicit file source
    ///
    /// When `env` is `Some`, it replaces the process environment, which keeps
    /// tests independent of the host.
    pub fn load_from<S>(
        file: S,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let lookup = |name: &str| -> Option<String> {
            env.as_ref().map_or_else(
                || std::env::var(name).ok(),
                |vars| vars.get(name).cloned(),
            )
        };

        let mut builder = config::Config::builder()
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., TONECRAFT__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(env.clone()),
            );

        for (var, key) in PROVIDER_KEY_VARS {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no request could succeed with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.speech
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("speech: {e}")))?;

        let timeouts = [
            ("text", self.generation.text_timeout_ms),
            ("image", self.generation.image_timeout_ms),
            ("audio", self.generation.audio_timeout_ms),
        ];
        if let Some((modality, _)) = timeouts.iter().find(|(_, ms)| *ms == 0) {
            return Err(config::ConfigError::Message(format!(
                "generation: {modality} timeout must be greater than 0"
            )));
        }

        if !(0.0..=2.0).contains(&self.text.temperature) {
            return Err(config::ConfigError::Message(format!(
                "text: temperature must be between 0.0 and 2.0, got {}",
                self.text.temperature
            )));
        }

        Ok(())
    }
}
