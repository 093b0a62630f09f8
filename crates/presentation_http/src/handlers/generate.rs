//! Per-modality generation handlers
//!
//! Every endpoint answers 200 with usable content. Provider trouble shows up
//! only as `"fallback": true` in the body.

use axum::{Json, extract::State};
use domain::{Modality, ModalityUpdate, Tone};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{
    AudioResponse, GenerationResponse, ImageResponse, TextResponse, build_request, lenient_tone,
};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Text generation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateTextRequest {
    /// Product or idea to write about
    #[validate(length(min = 1, max = 2000, message = "must be 1 to 2000 characters"))]
    pub prompt: String,
    /// `playful`, `serious` or `bold`; anything else is treated as playful
    #[serde(default, deserialize_with = "lenient_tone")]
    pub tone: String,
    /// Sampling temperature (0.0 to 2.0)
    #[validate(range(min = 0.0, max = 2.0, message = "must be between 0.0 and 2.0"))]
    pub temperature: Option<f32>,
}

/// Image generation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateImageRequest {
    #[validate(length(min = 1, max = 2000, message = "must be 1 to 2000 characters"))]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient_tone")]
    pub tone: String,
}

/// Audio narration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateAudioRequest {
    /// Script to narrate
    #[validate(length(min = 1, max = 4096, message = "must be 1 to 4096 characters"))]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_tone")]
    pub tone: String,
    /// Provider voice overriding the tone's default
    #[validate(length(min = 1, max = 64))]
    pub voice: Option<String>,
}

/// Regenerate one modality of an existing result
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegenerateRequest {
    #[validate(length(min = 1, max = 2000, message = "must be 1 to 2000 characters"))]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient_tone")]
    pub tone: String,
    #[validate(range(min = 0.0, max = 2.0, message = "must be between 0.0 and 2.0"))]
    pub temperature: Option<f32>,
    /// `text`, `image` or `audio`
    pub modality: String,
    /// The result shown to the user; untouched slots are returned as-is
    #[serde(default)]
    pub current: GenerationResponse,
}

fn unexpected(expected: Modality, update: &ModalityUpdate) -> ApiError {
    ApiError::Internal(format!(
        "expected {expected} update, got {}",
        update.modality()
    ))
}

/// Generate a headline and caption
#[utoipa::path(
    post,
    path = "/api/generate-text",
    tag = "generation",
    request_body = GenerateTextRequest,
    responses(
        (status = 200, description = "Generated or fallback copy", body = TextResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 405, description = "Method not allowed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(prompt_len = request.prompt.len(), tone = %request.tone))]
pub async fn generate_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateTextRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let request = build_request(&request.prompt, &request.tone, request.temperature)?;

    match state
        .orchestrator
        .generate_modality(&request, Modality::Text, None)
        .await
    {
        ModalityUpdate::Text(text) => {
            info!(fallback = text.used_fallback, "Text generated");
            Ok(Json(text.into()))
        },
        other => Err(unexpected(Modality::Text, &other)),
    }
}

/// Generate a hero image
#[utoipa::path(
    post,
    path = "/api/generate-image",
    tag = "generation",
    request_body = GenerateImageRequest,
    responses(
        (status = 200, description = "Generated or stock image", body = ImageResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 405, description = "Method not allowed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(prompt_len = request.prompt.len(), tone = %request.tone))]
pub async fn generate_image(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    let request = build_request(&request.prompt, &request.tone, None)?;

    match state
        .orchestrator
        .generate_modality(&request, Modality::Image, None)
        .await
    {
        ModalityUpdate::Image(image) => {
            info!(fallback = image.used_fallback, "Image generated");
            Ok(Json(image.into()))
        },
        other => Err(unexpected(Modality::Image, &other)),
    }
}

/// Narrate a script
#[utoipa::path(
    post,
    path = "/api/generate-audio",
    tag = "generation",
    request_body = GenerateAudioRequest,
    responses(
        (status = 200, description = "Audio data URL or speech synthesis marker", body = AudioResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 405, description = "Method not allowed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(text_len = request.text.len(), tone = %request.tone))]
pub async fn generate_audio(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateAudioRequest>,
) -> Result<Json<AudioResponse>, ApiError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Text must not be empty".to_string()));
    }

    let profile = Tone::from_str_lossy(&request.tone).profile();
    let audio = state.orchestrator.narrate(text, profile, request.voice).await;
    info!(fallback = audio.used_fallback, "Audio generated");

    Ok(Json(audio.into()))
}

/// Replace one modality of a result
#[utoipa::path(
    post,
    path = "/api/regenerate",
    tag = "generation",
    request_body = RegenerateRequest,
    responses(
        (status = 200, description = "Result with one modality replaced", body = GenerationResponse),
        (status = 400, description = "Invalid request or unknown modality", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(modality = %request.modality, tone = %request.tone))]
pub async fn regenerate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegenerateRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let modality: Modality = request.modality.parse()?;
    let generation = build_request(&request.prompt, &request.tone, request.temperature)?;
    let current = request.current.into_result(generation.profile());

    let result = state
        .orchestrator
        .regenerate(&generation, modality, &current)
        .await;

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_request_defaults() {
        let request: GenerateTextRequest = serde_json::from_str(r#"{"prompt": "mug"}"#).unwrap();
        assert_eq!(request.tone, "");
        assert!(request.temperature.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn non_string_tone_reads_as_unset() {
        for body in [
            r#"{"prompt": "mug", "tone": null}"#,
            r#"{"prompt": "mug", "tone": 7}"#,
            r#"{"prompt": "mug", "tone": ["bold"]}"#,
        ] {
            let request: GenerateTextRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.tone, "", "{body}");
        }

        let request: GenerateAudioRequest =
            serde_json::from_str(r#"{"text": "hi", "tone": "Bold"}"#).unwrap();
        assert_eq!(request.tone, "Bold");
    }

    #[test]
    fn overlong_prompt_fails_validation() {
        let request = GenerateImageRequest {
            prompt: "x".repeat(2001),
            tone: "bold".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn regenerate_request_without_current_is_empty_result() {
        let request: RegenerateRequest = serde_json::from_str(
            r#"{"prompt": "mug", "tone": "bold", "modality": "image"}"#,
        )
        .unwrap();
        assert_eq!(request.current, GenerationResponse::default());
    }

    #[test]
    fn empty_voice_is_rejected() {
        let request = GenerateAudioRequest {
            text: "hello".to_string(),
            tone: "serious".to_string(),
            voice: Some(String::new()),
        };
        assert!(request.validate().is_err());
    }
}
