//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{sync::Arc, time::Duration};

use application::{
    GenerationOrchestrator, OrchestratorConfig,
    ports::{AdapterOutcome, AudioGenerationPort, Deadline, ImageGenerationPort, TextGenerationPort},
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::{AudioContent, ImageContent, TextContent, ToneProfile};
use infrastructure::{AppConfig, build_orchestrator};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

/// Text provider returning fixed copy
struct CannedText(&'static str);

#[async_trait]
impl TextGenerationPort for CannedText {
    async fn generate(
        &self,
        _prompt: &str,
        _profile: &ToneProfile,
        _temperature: f32,
        _deadline: Deadline,
    ) -> AdapterOutcome<TextContent> {
        AdapterOutcome::Success(TextContent::new(self.0, "Fresh caption"))
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Image provider that never answers in time
struct HangingImage;

#[async_trait]
impl ImageGenerationPort for HangingImage {
    async fn generate(
        &self,
        _prompt: &str,
        _profile: &ToneProfile,
        _deadline: Deadline,
    ) -> AdapterOutcome<ImageContent> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        AdapterOutcome::Success(ImageContent::new("https://never/seen.png"))
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Audio provider returning a tiny data URL
struct CannedAudio;

#[async_trait]
impl AudioGenerationPort for CannedAudio {
    async fn generate(
        &self,
        narration: &str,
        _profile: &ToneProfile,
        _voice: Option<String>,
        _deadline: Deadline,
    ) -> AdapterOutcome<AudioContent> {
        AdapterOutcome::Success(AudioContent::from_url(
            "data:audio/mpeg;base64,SUQz",
            narration,
            "mp3",
        ))
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Server with no API keys: every modality takes its fallback path
fn unconfigured_server() -> TestServer {
    let config = AppConfig::default();
    let orchestrator = build_orchestrator(&config).expect("Failed to build orchestrator");
    TestServer::new(create_router(AppState::new(orchestrator, config)))
        .expect("Failed to create test server")
}

/// Server with working text and audio, and an image provider that times out
fn stubbed_server() -> TestServer {
    let orchestrator = GenerationOrchestrator::new(
        Arc::new(CannedText("Fresh Headline")),
        Arc::new(HangingImage),
        Arc::new(CannedAudio),
        OrchestratorConfig {
            text_timeout: Duration::from_secs(5),
            image_timeout: Duration::from_millis(50),
            audio_timeout: Duration::from_secs(5),
        },
    );
    TestServer::new(create_router(AppState::new(orchestrator, AppConfig::default())))
        .expect("Failed to create test server")
}

#[tokio::test]
async fn health_reports_version() {
    let server = unconfigured_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn api_health_lists_unconfigured_providers() {
    let server = unconfigured_server();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["providers"]["text"], false);
    assert_eq!(body["providers"]["image"], false);
    assert_eq!(body["providers"]["audio"], false);
}

#[tokio::test]
async fn api_health_lists_stubbed_providers() {
    let server = stubbed_server();

    let body: Value = server.get("/api/health").await.json();
    assert_eq!(body["providers"]["text"], true);
    assert_eq!(body["providers"]["image"], true);
}

#[tokio::test]
async fn text_without_key_is_fallback_not_error() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-text")
        .json(&json!({"prompt": "eco water bottle", "tone": "serious"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["fallback"], true);
    assert!(!body["headline"].as_str().unwrap_or_default().is_empty());
    assert!(!body["caption"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn image_without_key_is_stock_photo() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-image")
        .json(&json!({"prompt": "smart watch", "tone": "bold"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["fallback"], true);
    assert!(body["imageURL"].as_str().unwrap_or_default().starts_with("https://"));
}

#[tokio::test]
async fn audio_without_key_is_speech_marker() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-audio")
        .json(&json!({"text": "Meet the bottle that keeps up with you", "tone": "playful"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["audioURL"], "web-speech-ready");
    assert_eq!(body["format"], "web-speech");
    assert_eq!(body["fallback"], true);
    assert_eq!(body["text"], "Meet the bottle that keeps up with you");
    assert!(body["voiceSettings"]["pitch"].is_number());
    assert!(body["duration"].as_u64().unwrap_or_default() >= 1);
}

#[tokio::test]
async fn audio_with_provider_is_data_url() {
    let server = stubbed_server();

    let response = server
        .post("/api/generate-audio")
        .json(&json!({"text": "Hello there", "tone": "bold", "voice": "onyx"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["audioURL"], "data:audio/mpeg;base64,SUQz");
    assert_eq!(body["fallback"], false);
    assert!(body.get("voiceSettings").is_none());
}

#[tokio::test]
async fn blank_audio_text_is_rejected() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-audio")
        .json(&json!({"text": "   ", "tone": "bold"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn get_on_generation_route_is_405_json() {
    let server = unconfigured_server();

    for path in [
        "/api/generate-text",
        "/api/generate-image",
        "/api/generate-audio",
        "/api/generate",
        "/api/regenerate",
    ] {
        let response = server.get(path).expect_failure().await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["error"], "Method not allowed");
        assert_eq!(body["code"], "method_not_allowed");
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-text")
        .text("{\"prompt\": ")
        .content_type("application/json")
        .expect_failure()
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_json");
}

#[tokio::test]
async fn empty_or_blank_prompt_is_400() {
    let server = unconfigured_server();

    for prompt in ["", "   "] {
        let response = server
            .post("/api/generate-text")
            .json(&json!({"prompt": prompt, "tone": "playful"}))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn temperature_out_of_range_is_400() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-text")
        .json(&json!({"prompt": "mug", "tone": "bold", "temperature": 2.5}))
        .expect_failure()
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn unknown_tone_is_accepted() {
    let server = unconfigured_server();

    let response = server
        .post("/api/generate-text")
        .json(&json!({"prompt": "mug", "tone": "sarcastic"}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn unknown_or_missing_tone_matches_playful() {
    let server = unconfigured_server();

    let playful: Value = server
        .post("/api/generate-text")
        .json(&json!({"prompt": "mug", "tone": "playful"}))
        .await
        .json();

    for body in [
        json!({"prompt": "mug", "tone": "not_a_real_tone"}),
        json!({"prompt": "mug", "tone": null}),
        json!({"prompt": "mug", "tone": 3}),
        json!({"prompt": "mug"}),
    ] {
        let response = server.post("/api/generate-text").json(&body).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), playful, "{body}");
    }
}

#[tokio::test]
async fn unknown_route_is_404_json() {
    let server = unconfigured_server();

    let response = server.get("/api/nothing-here").expect_failure().await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = unconfigured_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("client-42"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "client-42");
}

#[tokio::test]
async fn stream_delivers_three_updates_then_done() {
    let server = stubbed_server();

    let response = server
        .post("/api/generate")
        .json(&json!({"prompt": "eco water bottle", "tone": "serious"}))
        .await;

    response.assert_status_ok();
    let body = response.text();

    let events: Vec<&str> = body
        .lines()
        .filter_map(|line| line.strip_prefix("event: "))
        .collect();
    assert_eq!(events.len(), 4);
    assert!(events[..3].iter().all(|e| *e == "update"));
    assert_eq!(events[3], "done");

    let done: Value = body
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .last()
        .map(|data| serde_json::from_str(data).expect("done payload is JSON"))
        .expect("done event has data");
    assert_eq!(done["text"]["headline"], "Fresh Headline");
    assert_eq!(done["text"]["fallback"], false);
    // The slow image provider hits its deadline and falls back
    assert_eq!(done["image"]["fallback"], true);
    assert_eq!(done["audio"]["audioURL"], "data:audio/mpeg;base64,SUQz");
}

#[tokio::test]
async fn stream_without_keys_settles_every_modality() {
    let server = unconfigured_server();

    let body = server
        .post("/api/generate")
        .json(&json!({"prompt": "running shoes", "tone": "bold"}))
        .await
        .text();

    let updates = body.lines().filter(|l| *l == "event: update").count();
    assert_eq!(updates, 3);
    assert!(body.contains("\"modality\":\"text\""));
    assert!(body.contains("\"modality\":\"image\""));
    assert!(body.contains("\"modality\":\"audio\""));
}

#[tokio::test]
async fn regenerate_replaces_only_requested_modality() {
    let server = stubbed_server();

    let response = server
        .post("/api/regenerate")
        .json(&json!({
            "prompt": "eco water bottle",
            "tone": "serious",
            "modality": "text",
            "current": {
                "text": {"headline": "Old", "caption": "Old caption", "fallback": true},
                "image": {"imageURL": "https://keep/me.png", "fallback": false},
                "audio": {
                    "audioURL": "web-speech-ready",
                    "text": "Old caption",
                    "audioDescription": "Old description",
                    "duration": 2,
                    "format": "web-speech",
                    "fallback": true
                }
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["text"]["headline"], "Fresh Headline");
    assert_eq!(body["text"]["fallback"], false);
    assert_eq!(body["image"]["imageURL"], "https://keep/me.png");
    assert_eq!(body["audio"]["text"], "Old caption");
    assert_eq!(body["audio"]["audioDescription"], "Old description");
}

#[tokio::test]
async fn regenerate_audio_narrates_current_caption() {
    let server = stubbed_server();

    let body: Value = server
        .post("/api/regenerate")
        .json(&json!({
            "prompt": "eco water bottle",
            "tone": "playful",
            "modality": "audio",
            "current": {
                "text": {"headline": "H", "caption": "one two three four five", "fallback": false}
            }
        }))
        .await
        .json();

    assert_eq!(body["audio"]["audioURL"], "data:audio/mpeg;base64,SUQz");
    assert_eq!(body["text"]["caption"], "one two three four five");
    assert!(body.get("image").is_none());
}

#[tokio::test]
async fn regenerate_unknown_modality_is_400() {
    let server = stubbed_server();

    let response = server
        .post("/api/regenerate")
        .json(&json!({"prompt": "mug", "tone": "bold", "modality": "video"}))
        .expect_failure()
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = unconfigured_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["info"]["title"], "Tonecraft API");
}
