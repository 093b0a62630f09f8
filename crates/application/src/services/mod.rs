//! Application services - Use case implementations

pub mod fallback_resolver;
mod orchestrator;
pub mod prompt_builder;

pub use fallback_resolver::ModalityOutcome;
pub use orchestrator::{GenerationOrchestrator, OrchestratorConfig, ProviderStatus};
