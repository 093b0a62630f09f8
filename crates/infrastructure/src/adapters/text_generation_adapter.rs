//! Text generation adapter - Implements TextGenerationPort using ai_core

use std::{sync::Arc, time::Instant};

use ai_core::{InferenceConfig, InferenceEngine, InferenceRequest, OpenAiCompatibleEngine};
use application::{
    error::ApplicationError,
    ports::{AdapterOutcome, Deadline, TextGenerationPort},
    services::prompt_builder,
};
use async_trait::async_trait;
use domain::{TextContent, ToneProfile};
use secrecy::SecretString;
use tracing::{debug, instrument, warn};

use super::{content_parser::parse_text_content, map_inference_error};

/// Headline/caption generation over an OpenAI-compatible chat endpoint
pub struct TextGenerationAdapter {
    engine: Option<Arc<dyn InferenceEngine>>,
}

impl std::fmt::Debug for TextGenerationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGenerationAdapter")
            .field(
                "model",
                &self.engine.as_ref().map(|engine| engine.default_model()),
            )
            .finish()
    }
}

impl TextGenerationAdapter {
    /// Create an adapter; without a key every call reports the provider as unavailable
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: InferenceConfig,
        api_key: Option<SecretString>,
    ) -> Result<Self, ApplicationError> {
        let engine = api_key
            .map(|key| OpenAiCompatibleEngine::new(config, key))
            .transpose()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            engine: engine.map(|e| Arc::new(e) as Arc<dyn InferenceEngine>),
        })
    }

    /// Wrap an existing engine
    pub fn with_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// An adapter with no credentials
    pub const fn unconfigured() -> Self {
        Self { engine: None }
    }
}

#[async_trait]
impl TextGenerationPort for TextGenerationAdapter {
    #[instrument(skip(self, prompt, profile, deadline), fields(tone = %profile.tone, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        profile: &ToneProfile,
        temperature: f32,
        deadline: Deadline,
    ) -> AdapterOutcome<TextContent> {
        let Some(engine) = &self.engine else {
            return AdapterOutcome::ProviderUnavailable("text provider not configured".into());
        };

        let request = InferenceRequest::with_system(
            prompt_builder::text_system_prompt(profile),
            prompt_builder::text_user_prompt(prompt),
        )
        .with_temperature(temperature);

        let start = Instant::now();
        deadline
            .race(async {
                match engine.generate(request).await {
                    Ok(response) => {
                        debug!(
                            model = %response.model,
                            latency_ms = start.elapsed().as_millis(),
                            "Chat completion received"
                        );
                        parse_text_content(&response.content).map_or_else(
                            || {
                                warn!(content_len = response.content.len(), "Unparseable completion");
                                AdapterOutcome::MalformedResponse(
                                    "completion has no headline and caption".into(),
                                )
                            },
                            AdapterOutcome::Success,
                        )
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
