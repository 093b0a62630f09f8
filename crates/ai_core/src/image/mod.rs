//! Image generation engines

mod openai;
mod stability;

pub use openai::OpenAiImageEngine;
pub use stability::StabilityImageEngine;
