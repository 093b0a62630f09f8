//! Image generation adapter - Implements ImageGenerationPort using ai_core

use std::sync::Arc;

use ai_core::{
    ImageConfig, ImageEngine, ImageProvider, ImageRequest, OpenAiImageEngine,
    StabilityImageEngine,
};
use application::{
    error::ApplicationError,
    ports::{AdapterOutcome, Deadline, ImageGenerationPort},
    services::prompt_builder,
};
use async_trait::async_trait;
use domain::{ImageContent, ToneProfile};
use secrecy::SecretString;
use tracing::{debug, instrument};

use super::map_inference_error;

/// Hero image generation over OpenAI images or Stability AI
pub struct ImageGenerationAdapter {
    engine: Option<Arc<dyn ImageEngine>>,
}

impl std::fmt::Debug for ImageGenerationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerationAdapter")
            .field(
                "provider",
                &self.engine.as_ref().map(|engine| engine.provider_name()),
            )
            .finish()
    }
}

impl ImageGenerationAdapter {
    /// Create an adapter for the configured provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ImageConfig, api_key: Option<SecretString>) -> Result<Self, ApplicationError> {
        let Some(key) = api_key else {
            return Ok(Self { engine: None });
        };

        let engine: Arc<dyn ImageEngine> = match config.provider {
            ImageProvider::OpenAi => Arc::new(OpenAiImageEngine::new(config, key).map_err(
                |e| ApplicationError::Configuration(e.to_string()),
            )?),
            ImageProvider::Stability => Arc::new(StabilityImageEngine::new(config, key).map_err(
                |e| ApplicationError::Configuration(e.to_string()),
            )?),
        };

        Ok(Self {
            engine: Some(engine),
        })
    }

    pub fn with_engine(engine: Arc<dyn ImageEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }
}

#[async_trait]
impl ImageGenerationPort for ImageGenerationAdapter {
    #[instrument(skip(self, prompt, profile, deadline), fields(tone = %profile.tone))]
    async fn generate(
        &self,
        prompt: &str,
        profile: &ToneProfile,
        deadline: Deadline,
    ) -> AdapterOutcome<ImageContent> {
        let Some(engine) = &self.engine else {
            return AdapterOutcome::ProviderUnavailable("image provider not configured".into());
        };

        let request = ImageRequest::new(prompt_builder::image_prompt(prompt, profile))
            .with_style(profile.image_style);

        deadline
            .race(async {
                match engine.generate_image(request).await {
                    Ok(image) => {
                        debug!(provider = engine.provider_name(), "Image generated");
                        let content = ImageContent::new(image.url);
                        AdapterOutcome::Success(match image.revised_prompt {
                            Some(revised) => content.with_revised_prompt(revised),
                            None => content,
                        })
                    },
                    Err(e) => map_inference_error(e),
                }
            })
            .await
    }

    fn is_configured(&self) -> bool {
        self.engine.is_some()
    }
}
