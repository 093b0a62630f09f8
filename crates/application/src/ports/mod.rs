//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod generation_port;

pub use generation_port::{
    AdapterOutcome, AudioGenerationPort, Deadline, ImageGenerationPort, TextGenerationPort,
};
#[cfg(test)]
pub use generation_port::{MockAudioGenerationPort, MockImageGenerationPort, MockTextGenerationPort};
