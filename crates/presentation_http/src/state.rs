//! Application state shared across handlers

use std::sync::Arc;

use application::GenerationOrchestrator;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Fans each request out to the text, image and audio providers
    pub orchestrator: Arc<GenerationOrchestrator>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("providers", &self.orchestrator.provider_status())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(orchestrator: GenerationOrchestrator, config: AppConfig) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            config: Arc::new(config),
        }
    }
}
