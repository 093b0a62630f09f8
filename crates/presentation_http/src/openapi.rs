//! OpenAPI documentation module
//!
//! Serves the document at `/api-docs/openapi.json` and Swagger UI at
//! `/swagger-ui`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error::ErrorResponse, handlers, state::AppState};

/// OpenAPI documentation for Tonecraft
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tonecraft API",
        version = "0.1.0",
        description = "Tone-driven marketing copy, hero images and voiceovers with graceful fallbacks",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and provider configuration"),
        (name = "generation", description = "Text, image and audio generation")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::provider_health,
        handlers::generate::generate_text,
        handlers::generate::generate_image,
        handlers::generate::generate_audio,
        handlers::generate::regenerate,
        handlers::stream::generate_stream,
    ),
    components(schemas(
        ErrorResponse,
        handlers::health::HealthResponse,
        handlers::health::ProviderHealthResponse,
        handlers::health::ProvidersStatus,
        handlers::generate::GenerateTextRequest,
        handlers::generate::GenerateImageRequest,
        handlers::generate::GenerateAudioRequest,
        handlers::generate::RegenerateRequest,
        handlers::common::TextResponse,
        handlers::common::ImageResponse,
        handlers::common::AudioResponse,
        handlers::common::VoiceSettingsDto,
        handlers::common::GenerationResponse,
    ))
)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document and Swagger UI
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_is_valid() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&doc).expect("Failed to serialize OpenAPI spec");
        assert!(json.contains("Tonecraft API"));
        assert!(json.contains("/health"));
        assert!(json.contains("/api/generate-text"));
        assert!(json.contains("/api/regenerate"));
    }

    #[test]
    fn openapi_has_all_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<&str> = doc
            .tags
            .as_ref()
            .map(|t| t.iter().map(|tag| tag.name.as_str()).collect())
            .unwrap_or_default();

        assert!(tags.contains(&"health"));
        assert!(tags.contains(&"generation"));
    }

    #[test]
    fn client_field_names_are_documented() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("imageURL"));
        assert!(json.contains("audioURL"));
        assert!(json.contains("voiceSettings"));
    }
}
