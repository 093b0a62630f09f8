//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Uri,
    middleware,
    routing::{get, post},
};

use crate::{error::ApiError, handlers, middleware::request_id, openapi, state::AppState};

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/api/health", get(handlers::health::provider_health))
        // Generation API
        .route("/api/generate", post(handlers::stream::generate_stream))
        .route("/api/generate-text", post(handlers::generate::generate_text))
        .route("/api/generate-image", post(handlers::generate::generate_image))
        .route("/api/generate-audio", post(handlers::generate::generate_audio))
        .route("/api/regenerate", post(handlers::generate::regenerate))
        // API documentation
        .merge(openapi::create_openapi_routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}
