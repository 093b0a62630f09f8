//! Application layer - Use cases and orchestration
//!
//! Defines the generation ports that infrastructure adapters implement, the
//! fallback policy, and the orchestrator that fans out to the three modalities.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
