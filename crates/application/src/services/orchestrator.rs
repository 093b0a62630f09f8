//! Generation orchestrator
//!
//! Fans one [`GenerationRequest`] out to the text, image and audio ports and
//! reports each modality as soon as it settles. Provider failures never
//! escape: every outcome is passed through the fallback resolver first.

use std::{fmt, sync::Arc, time::Duration};

use domain::{
    AudioContent, Generated, GenerationRequest, GenerationResult, Modality, ModalityUpdate,
    ToneProfile,
};
use futures::{
    FutureExt, StreamExt,
    future::BoxFuture,
    stream::{self, BoxStream, FuturesUnordered},
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span, instrument};

use crate::ports::{AudioGenerationPort, Deadline, ImageGenerationPort, TextGenerationPort};
use crate::services::fallback_resolver;

/// Per-modality time budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub text_timeout: Duration,
    pub image_timeout: Duration,
    pub audio_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            text_timeout: Duration::from_secs(15),
            image_timeout: Duration::from_secs(60),
            audio_timeout: Duration::from_secs(45),
        }
    }
}

/// Which providers have credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub text: bool,
    pub image: bool,
    pub audio: bool,
}

/// Coordinates the three generation ports for one request at a time
pub struct GenerationOrchestrator {
    text: Arc<dyn TextGenerationPort>,
    image: Arc<dyn ImageGenerationPort>,
    audio: Arc<dyn AudioGenerationPort>,
    config: OrchestratorConfig,
}

impl fmt::Debug for GenerationOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationOrchestrator")
            .field("config", &self.config)
            .field("providers", &self.provider_status())
            .finish_non_exhaustive()
    }
}

impl GenerationOrchestrator {
    pub fn new(
        text: Arc<dyn TextGenerationPort>,
        image: Arc<dyn ImageGenerationPort>,
        audio: Arc<dyn AudioGenerationPort>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            text,
            image,
            audio,
            config,
        }
    }

    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn provider_status(&self) -> ProviderStatus {
        ProviderStatus {
            text: self.text.is_configured(),
            image: self.image.is_configured(),
            audio: self.audio.is_configured(),
        }
    }

    /// Generate all three modalities, yielding each as it settles
    ///
    /// Dropping the stream cancels every call still in flight.
    pub fn orchestrate(&self, request: GenerationRequest) -> BoxStream<'static, ModalityUpdate> {
        self.orchestrate_with_cancellation(request, CancellationToken::new())
    }

    /// Like [`orchestrate`](Self::orchestrate), additionally stopped by `cancel`
    ///
    /// Calls interrupted by `cancel` settle as fallbacks.
    #[instrument(skip(self, request, cancel), fields(tone = %request.tone()))]
    pub fn orchestrate_with_cancellation(
        &self,
        request: GenerationRequest,
        cancel: CancellationToken,
    ) -> BoxStream<'static, ModalityUpdate> {
        // Audio never waits for text; it narrates the placeholder caption.
        let narration = request.placeholder_caption();

        let pending: FuturesUnordered<BoxFuture<'static, ModalityUpdate>> = FuturesUnordered::new();
        pending.push(self.text_call(&request, cancel.child_token()));
        pending.push(self.image_call(&request, cancel.child_token()));
        pending.push(
            self.audio_call(narration, request.profile(), None, cancel.child_token())
                .map(ModalityUpdate::Audio)
                .boxed(),
        );

        let guard = cancel.drop_guard();
        stream::unfold((pending, guard), |(mut pending, guard)| async move {
            let update = pending.next().await?;
            debug!(
                modality = %update.modality(),
                used_fallback = update.used_fallback(),
                "Modality settled"
            );
            Some((update, (pending, guard)))
        })
        .boxed()
    }

    /// Generate all three modalities and return the merged result
    pub async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        self.orchestrate(request)
            .fold(GenerationResult::pending(), |result, update| async move {
                result.with(update)
            })
            .await
    }

    /// Re-run exactly one modality, copying the other two slots from `current`
    ///
    /// Audio narrates the caption already present in `current`, when there is one.
    #[instrument(skip(self, request, current), fields(tone = %request.tone()))]
    pub async fn regenerate(
        &self,
        request: &GenerationRequest,
        modality: Modality,
        current: &GenerationResult,
    ) -> GenerationResult {
        let update = self
            .generate_modality(request, modality, current.caption())
            .await;
        current.clone().with(update)
    }

    /// Generate a single modality
    ///
    /// `caption` is the audio narration; without it the placeholder caption is used.
    pub async fn generate_modality(
        &self,
        request: &GenerationRequest,
        modality: Modality,
        caption: Option<&str>,
    ) -> ModalityUpdate {
        let cancel = CancellationToken::new();
        match modality {
            Modality::Text => self.text_call(request, cancel).await,
            Modality::Image => self.image_call(request, cancel).await,
            Modality::Audio => {
                let narration = caption
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map_or_else(|| request.placeholder_caption(), str::to_string);
                let audio = self
                    .audio_call(narration, request.profile(), None, cancel)
                    .await;
                ModalityUpdate::Audio(audio)
            },
        }
    }

    /// Narrate arbitrary text, optionally with a specific provider voice
    pub async fn narrate(
        &self,
        text: &str,
        profile: &'static ToneProfile,
        voice: Option<String>,
    ) -> Generated<AudioContent> {
        self.audio_call(text.to_string(), profile, voice, CancellationToken::new())
            .await
    }

    fn text_call(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, ModalityUpdate> {
        let port = Arc::clone(&self.text);
        let prompt = request.prompt().to_string();
        let profile = request.profile();
        let temperature = request.temperature();
        let deadline = Deadline::with_cancel(self.config.text_timeout, cancel);

        async move {
            let outcome = deadline
                .race(port.generate(&prompt, profile, temperature, deadline.clone()))
                .await;
            ModalityUpdate::Text(fallback_resolver::resolve_text(outcome, &prompt, profile))
        }
        .instrument(info_span!("generate_text"))
        .boxed()
    }

    fn image_call(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, ModalityUpdate> {
        let port = Arc::clone(&self.image);
        let prompt = request.prompt().to_string();
        let profile = request.profile();
        let deadline = Deadline::with_cancel(self.config.image_timeout, cancel);

        async move {
            let outcome = deadline
                .race(port.generate(&prompt, profile, deadline.clone()))
                .await;
            ModalityUpdate::Image(fallback_resolver::resolve_image(outcome, &prompt, profile))
        }
        .instrument(info_span!("generate_image"))
        .boxed()
    }

    fn audio_call(
        &self,
        narration: String,
        profile: &'static ToneProfile,
        voice: Option<String>,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, Generated<AudioContent>> {
        let port = Arc::clone(&self.audio);
        let deadline = Deadline::with_cancel(self.config.audio_timeout, cancel);

        async move {
            let outcome = deadline
                .race(port.generate(&narration, profile, voice, deadline.clone()))
                .await;
            fallback_resolver::resolve_audio(outcome, &narration, profile)
        }
        .instrument(info_span!("generate_audio"))
        .boxed()
    }
}
