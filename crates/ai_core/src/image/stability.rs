//! Stability AI text-to-image client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use tracing::{debug, info, instrument, warn};

use crate::config::ImageConfig;
use crate::error::InferenceError;
use crate::ports::{GeneratedImage, ImageEngine, ImageRequest};

const CFG_SCALE: u32 = 7;
const STEPS: u32 = 30;

/// Image engine for Stability's v1 text-to-image endpoint
///
/// Stability returns base64 artefacts; they are exposed as PNG data URLs.
pub struct StabilityImageEngine {
    client: Client,
    config: ImageConfig,
    api_key: SecretString,
}

impl fmt::Debug for StabilityImageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StabilityImageEngine")
            .field("base_url", &self.config.stability_base_url)
            .field("engine", &self.config.stability_engine)
            .finish_non_exhaustive()
    }
}

impl StabilityImageEngine {
    pub fn new(config: ImageConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.stability_base_url,
            engine = %config.stability_engine,
            "Initialized Stability image engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn text_to_image_url(&self) -> String {
        format!(
            "{}/v1/generation/{}/text-to-image",
            self.config.stability_base_url.trim_end_matches('/'),
            self.config.stability_engine
        )
    }
}

#[derive(Debug, Serialize)]
struct TextToImageRequest<'a> {
    text_prompts: [TextPrompt<'a>; 1],
    cfg_scale: u32,
    width: u32,
    height: u32,
    samples: u32,
    steps: u32,
}

#[derive(Debug, Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
    weight: f32,
}

#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(default)]
    base64: Option<String>,
}

#[async_trait]
impl ImageEngine for StabilityImageEngine {
    #[instrument(skip(self, request), fields(engine = %self.config.stability_engine))]
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, InferenceError> {
        let (width, height) = self.config.dimensions();
        let body = TextToImageRequest {
            text_prompts: [TextPrompt {
                text: &request.prompt,
                weight: 1.0,
            }],
            cfg_scale: CFG_SCALE,
            width,
            height,
            samples: 1,
            steps: STEPS,
        };

        debug!("Sending text-to-image request");

        let response = self
            .client
            .post(self.text_to_image_url())
            .bearer_auth(self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Text-to-image request failed");
            return Err(InferenceError::from_status(status, &body));
        }

        let parsed: TextToImageResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let base64 = parsed
            .artifacts
            .into_iter()
            .next()
            .and_then(|a| a.base64)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| InferenceError::InvalidResponse("no artifact returned".to_string()))?;

        Ok(GeneratedImage {
            url: format!("data:image/png;base64,{base64}"),
            revised_prompt: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stability"
    }
}
