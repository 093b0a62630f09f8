//! Generation ports - one adapter contract per modality
//!
//! Every adapter call issues at most one outbound request, bounded by a
//! [`Deadline`]. Failures are reported as [`AdapterOutcome`] variants rather
//! than errors so the fallback resolver can handle them uniformly.

use std::{fmt, future::Future, time::Duration};

use async_trait::async_trait;
use domain::{AudioContent, ImageContent, TextContent, ToneProfile};
#[cfg(test)]
use mockall::automock;
use tokio_util::sync::CancellationToken;

/// Normalized result of one adapter invocation
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome<T> {
    /// The provider returned a usable payload
    Success(T),
    /// Missing credentials, transport failure or non-2xx response
    ProviderUnavailable(String),
    /// The call exceeded its deadline or was cancelled
    Timeout,
    /// 2xx response that could not be turned into a payload
    MalformedResponse(String),
}

impl<T> AdapterOutcome<T> {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Stable label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::Timeout => "timeout",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AdapterOutcome<U> {
        match self {
            Self::Success(value) => AdapterOutcome::Success(f(value)),
            Self::ProviderUnavailable(reason) => AdapterOutcome::ProviderUnavailable(reason),
            Self::Timeout => AdapterOutcome::Timeout,
            Self::MalformedResponse(detail) => AdapterOutcome::MalformedResponse(detail),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> fmt::Display for AdapterOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(_) => f.write_str("success"),
            Self::ProviderUnavailable(reason) => write!(f, "provider unavailable: {reason}"),
            Self::Timeout => f.write_str("timeout"),
            Self::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

/// Time budget and cancellation handle for one adapter call
#[derive(Debug, Clone)]
pub struct Deadline {
    pub timeout: Duration,
    pub cancel: CancellationToken,
}

impl Deadline {
    /// A deadline with its own, never-cancelled token
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            cancel: CancellationToken::new(),
        }
    }

    pub const fn with_cancel(timeout: Duration, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }

    /// Race `call` against the timeout and the cancellation token
    ///
    /// Whichever fires first wins; the losing `call` future is dropped, which
    /// aborts any in-flight request it owns.
    pub async fn race<T, F>(&self, call: F) -> AdapterOutcome<T>
    where
        F: Future<Output = AdapterOutcome<T>>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => AdapterOutcome::Timeout,
            outcome = call => outcome,
            () = tokio::time::sleep(self.timeout) => AdapterOutcome::Timeout,
        }
    }
}

/// Port for headline/caption generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// Generate marketing copy for `prompt` in the profile's tone
    async fn generate(
        &self,
        prompt: &str,
        profile: &ToneProfile,
        temperature: f32,
        deadline: Deadline,
    ) -> AdapterOutcome<TextContent>;

    /// Whether credentials for the provider are present
    fn is_configured(&self) -> bool;
}

/// Port for hero image generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        profile: &ToneProfile,
        deadline: Deadline,
    ) -> AdapterOutcome<ImageContent>;

    fn is_configured(&self) -> bool;
}

/// Port for narration audio generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioGenerationPort: Send + Sync {
    /// Narrate `narration`; `voice` overrides the profile's default voice
    async fn generate(
        &self,
        narration: &str,
        profile: &ToneProfile,
        voice: Option<String>,
        deadline: Deadline,
    ) -> AdapterOutcome<AudioContent>;

    fn is_configured(&self) -> bool;
}
