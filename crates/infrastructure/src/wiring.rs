//! Builds the orchestrator from configuration.

use std::sync::Arc;

use application::{GenerationOrchestrator, error::ApplicationError};
use tracing::{info, warn};

use crate::adapters::{ImageGenerationAdapter, SpeechSynthesisAdapter, TextGenerationAdapter};
use crate::config::AppConfig;

/// Wire provider adapters into a [`GenerationOrchestrator`]
///
/// Missing keys are not an error: the affected modality always falls back.
///
/// # Errors
///
/// Returns an error if a provider client cannot be constructed.
pub fn build_orchestrator(config: &AppConfig) -> Result<GenerationOrchestrator, ApplicationError> {
    let keys = &config.api_keys;

    let text = TextGenerationAdapter::new(config.text.clone(), keys.text_key(&config.text))?;
    let image = ImageGenerationAdapter::new(
        config.image.clone(),
        keys.image_key(config.image.provider),
    )?;
    let audio = SpeechSynthesisAdapter::new(
        config.speech.clone(),
        keys.speech_key(config.speech.provider),
    )?;

    let orchestrator = GenerationOrchestrator::new(
        Arc::new(text),
        Arc::new(image),
        Arc::new(audio),
        config.generation.orchestrator_config(),
    );

    let status = orchestrator.provider_status();
    info!(
        text = status.text,
        image = status.image,
        audio = status.audio,
        "Generation providers wired"
    );
    if !(status.text && status.image && status.audio) {
        warn!("Some providers are not configured; their content will use fallbacks");
    }

    Ok(orchestrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_builds_all_fallback_orchestrator() {
        let orchestrator = build_orchestrator(&AppConfig::default()).unwrap();
        let status = orchestrator.provider_status();
        assert!(!status.text);
        assert!(!status.image);
        assert!(!status.audio);
    }

    #[test]
    fn keys_enable_matching_providers() {
        let mut config = AppConfig::default();
        config.api_keys.groq = Some("gsk".into());
        config.api_keys.openai = Some("sk".into());

        let status = build_orchestrator(&config).unwrap().provider_status();
        assert!(status.text);
        assert!(status.image);
        assert!(status.audio);
    }
}
