//! Logging initialization
//!
//! Installs a global `tracing` subscriber with an [`EnvFilter`] and either
//! human-readable or JSON output. `RUST_LOG` takes precedence over the
//! configured filter.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, one line per event
    #[default]
    Text,
    /// Structured JSON, one object per event
    Json,
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "tonecraft=debug,tower_http=info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Log line format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "warn,tonecraft_server=info,presentation_http=info,application=info,infrastructure=info,\
     ai_core=info,ai_speech=info,tower_http=info"
        .to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

/// Errors that can occur while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed
    #[error("Failed to initialize telemetry: {0}")]
    Init(String),
}

/// Build the filter from `RUST_LOG`, falling back to the configured directive
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_filter).map_err(|e| TelemetryError::InvalidFilter(e.to_string()))
}

/// Install the global subscriber
///
/// Call once, early in `main`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = ?config.format, "Telemetry initialized");
    Ok(())
}
