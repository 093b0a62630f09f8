//! OpenAI-compatible chat client implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};

/// Chat completion engine speaking the OpenAI wire format
pub struct OpenAiCompatibleEngine {
    client: Client,
    config: InferenceConfig,
    api_key: SecretString,
}

impl fmt::Debug for OpenAiCompatibleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleEngine")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.default_model)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleEngine {
    /// Create a new engine
    pub fn new(config: InferenceConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized chat completion engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [InferenceMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl InferenceEngine for OpenAiCompatibleEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request);

        let body = ChatCompletionRequest {
            model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            response_format: self.config.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!("Sending chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request failed");
            return Err(InferenceError::from_status(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("no choices returned".to_string()))?;

        let content = choice
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| InferenceError::InvalidResponse("choice has no content".to_string()))?;

        debug!(tokens = ?completion.usage, "Chat completion finished");

        Ok(InferenceResponse {
            content,
            model: completion.model.unwrap_or_else(|| model.to_string()),
            usage: completion.usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(base_url: &str) -> OpenAiCompatibleEngine {
        let config = InferenceConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        OpenAiCompatibleEngine::new(config, SecretString::from("test-key")).unwrap()
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        assert_eq!(
            engine("http://localhost:8080/v1/").completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn request_model_overrides_default() {
        let engine = engine("http://localhost");
        let request = InferenceRequest::with_system("s", "u").with_model("other");
        assert_eq!(engine.resolve_model(&request), "other");
        let request = InferenceRequest::with_system("s", "u");
        assert_eq!(engine.resolve_model(&request), "llama3-8b-8192");
    }

    #[test]
    fn debug_does_not_leak_key() {
        let debug = format!("{:?}", engine("http://localhost"));
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn json_mode_serializes_response_format() {
        let messages = vec![InferenceMessage::user("hi")];
        let body = ChatCompletionRequest {
            model: "m",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 300,
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 300);
    }
}
