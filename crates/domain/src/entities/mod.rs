//! Domain entities - requests and the content produced for them

mod content;
mod generation_request;
mod generation_result;

pub use content::{
    AudioContent, AudioHandle, Generated, ImageContent, TextContent, estimate_duration_secs,
};
pub use generation_request::{DEFAULT_TEMPERATURE, GenerationRequest};
pub use generation_result::{GenerationResult, ModalityUpdate};
