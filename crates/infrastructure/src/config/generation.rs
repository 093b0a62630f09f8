//! Per-modality generation budgets.

use std::time::Duration;

use application::OrchestratorConfig;
use serde::{Deserialize, Serialize};

/// Time budgets for each modality, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_text_timeout_ms")]
    pub text_timeout_ms: u64,

    #[serde(default = "default_image_timeout_ms")]
    pub image_timeout_ms: u64,

    #[serde(default = "default_audio_timeout_ms")]
    pub audio_timeout_ms: u64,
}

const fn default_text_timeout_ms() -> u64 {
    15_000
}

const fn default_image_timeout_ms() -> u64 {
    60_000
}

const fn default_audio_timeout_ms() -> u64 {
    45_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            text_timeout_ms: default_text_timeout_ms(),
            image_timeout_ms: default_image_timeout_ms(),
            audio_timeout_ms: default_audio_timeout_ms(),
        }
    }
}

impl GenerationConfig {
    #[must_use]
    pub const fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            text_timeout: Duration::from_millis(self.text_timeout_ms),
            image_timeout: Duration::from_millis(self.image_timeout_ms),
            audio_timeout: Duration::from_millis(self.audio_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_orchestrator_defaults() {
        assert_eq!(
            GenerationConfig::default().orchestrator_config(),
            OrchestratorConfig::default()
        );
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: GenerationConfig =
            serde_json::from_value(serde_json::json!({"image_timeout_ms": 5000})).unwrap();
        assert_eq!(config.image_timeout_ms, 5000);
        assert_eq!(config.text_timeout_ms, 15_000);
    }
}
