//! OpenAI images API client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use tracing::{debug, info, instrument, warn};

use crate::config::ImageConfig;
use crate::error::InferenceError;
use crate::ports::{GeneratedImage, ImageEngine, ImageRequest};

/// Image engine for `POST {base}/images/generations`
pub struct OpenAiImageEngine {
    client: Client,
    config: ImageConfig,
    api_key: SecretString,
}

impl fmt::Debug for OpenAiImageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiImageEngine")
            .field("base_url", &self.config.openai_base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiImageEngine {
    pub fn new(config: ImageConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.openai_base_url,
            model = %config.model,
            "Initialized OpenAI image engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn generations_url(&self) -> String {
        format!(
            "{}/images/generations",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerationsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerationsResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

#[async_trait]
impl ImageEngine for OpenAiImageEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, InferenceError> {
        let body = GenerationsRequest {
            model: &self.config.model,
            prompt: &request.prompt,
            n: 1,
            size: &self.config.size,
            quality: &self.config.quality,
            response_format: "url",
            style: request.style.as_deref(),
        };

        debug!("Sending image generation request");

        let response = self
            .client
            .post(self.generations_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Image generation request failed");
            return Err(InferenceError::from_status(status, &body));
        }

        let parsed: GenerationsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let image = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("no image returned".to_string()))?;

        let url = image
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| InferenceError::InvalidResponse("image has no url".to_string()))?;

        Ok(GeneratedImage {
            url,
            revised_prompt: image.revised_prompt,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
