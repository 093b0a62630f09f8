//! Integration tests for provider clients using WireMock
//!
//! These tests mock the provider HTTP APIs to verify client behavior without
//! network access or real credentials.

use ai_core::{
    ImageConfig, ImageEngine, ImageRequest, InferenceConfig, InferenceEngine, InferenceError,
    InferenceRequest, OpenAiCompatibleEngine, OpenAiImageEngine, StabilityImageEngine,
};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn inference_config_for_mock(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        base_url: format!("{base_url}/v1"),
        default_model: "test-model".to_string(),
        timeout_ms: 5000,
        max_tokens: 300,
        temperature: 0.7,
        json_mode: true,
    }
}

fn image_config_for_mock(base_url: &str) -> ImageConfig {
    ImageConfig {
        openai_base_url: format!("{base_url}/v1"),
        stability_base_url: base_url.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn key() -> SecretString {
    SecretString::from("test-key")
}

/// Sample chat completion success response
fn chat_success_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 18, "total_tokens": 60}
    })
}

// =============================================================================
// Chat Completion Tests
// =============================================================================

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "max_tokens": 300,
                "response_format": {"type": "json_object"}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_success_response(r#"{"headline":"H","caption":"C"}"#)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock(&mock_server.uri()), key())
                .expect("Failed to create engine");

        let response = engine
            .generate(InferenceRequest::with_system("system", "user"))
            .await
            .expect("generation should succeed");

        assert_eq!(response.content, r#"{"headline":"H","caption":"C"}"#);
        assert_eq!(response.model, "test-model");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(60));
    }

    #[tokio::test]
    async fn request_temperature_is_forwarded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({"temperature": 1.5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock(&mock_server.uri()), key())
                .unwrap();
        let result = engine
            .generate(InferenceRequest::with_system("s", "u").with_temperature(1.5))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn server_error_maps_to_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock(&mock_server.uri()), key())
                .unwrap();
        let err = engine
            .generate(InferenceRequest::with_system("s", "u"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::ServerError(msg) if msg.contains("boom")));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock(&mock_server.uri()), key())
                .unwrap();
        let err = engine
            .generate(InferenceRequest::with_system("s", "u"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock(&mock_server.uri()), key())
                .unwrap();
        let err = engine
            .generate(InferenceRequest::with_system("s", "u"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock(&mock_server.uri()), key())
                .unwrap();
        let err = engine
            .generate(InferenceRequest::with_system("s", "u"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_connection_failed() {
        let engine =
            OpenAiCompatibleEngine::new(inference_config_for_mock("http://127.0.0.1:1"), key())
                .unwrap();
        let err = engine
            .generate(InferenceRequest::with_system("s", "u"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::ConnectionFailed(_)));
    }
}

// =============================================================================
// Image Engine Tests
// =============================================================================

mod image_tests {
    use super::*;

    #[tokio::test]
    async fn openai_returns_url_and_revised_prompt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(body_partial_json(serde_json::json!({
                "model": "dall-e-3",
                "n": 1,
                "style": "vivid"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "created": 1,
                "data": [{"url": "https://img.test/1.png", "revised_prompt": "A shiny mug"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiImageEngine::new(image_config_for_mock(&mock_server.uri()), key()).unwrap();
        let image = engine
            .generate_image(ImageRequest::new("A mug").with_style("vivid"))
            .await
            .unwrap();

        assert_eq!(image.url, "https://img.test/1.png");
        assert_eq!(image.revised_prompt.as_deref(), Some("A shiny mug"));
    }

    #[tokio::test]
    async fn openai_missing_url_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": [{}]})),
            )
            .mount(&mock_server)
            .await;

        let engine =
            OpenAiImageEngine::new(image_config_for_mock(&mock_server.uri()), key()).unwrap();
        let err = engine
            .generate_image(ImageRequest::new("A mug"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn stability_returns_data_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(
                "/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image",
            ))
            .and(body_partial_json(serde_json::json!({
                "text_prompts": [{"text": "A mug", "weight": 1.0}],
                "width": 1024,
                "samples": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "artifacts": [{"base64": "iVBORw0KGgo=", "finishReason": "SUCCESS"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine =
            StabilityImageEngine::new(image_config_for_mock(&mock_server.uri()), key()).unwrap();
        let image = engine
            .generate_image(ImageRequest::new("A mug"))
            .await
            .unwrap();

        assert_eq!(image.url, "data:image/png;base64,iVBORw0KGgo=");
        assert!(image.revised_prompt.is_none());
    }

    #[tokio::test]
    async fn stability_rate_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let engine =
            StabilityImageEngine::new(image_config_for_mock(&mock_server.uri()), key()).unwrap();
        let err = engine
            .generate_image(ImageRequest::new("A mug"))
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::RateLimited));
    }
}
