//! Infrastructure layer - Adapters for external systems
//!
//! Implements the generation ports defined in the application layer on top of
//! the `ai_core` and `ai_speech` provider clients, and owns configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::{ApiKeys, AppConfig, GenerationConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, init_telemetry};
pub use wiring::build_orchestrator;
