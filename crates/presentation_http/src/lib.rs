//! Tonecraft HTTP presentation layer
//!
//! Exposes per-modality generation endpoints, an SSE stream of all three
//! modalities, single-modality regeneration and health checks.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{RequestId, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
