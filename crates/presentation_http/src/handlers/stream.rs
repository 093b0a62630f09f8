//! Streaming generation over Server-Sent Events
//!
//! One `update` event per modality in settlement order, then a `done` event
//! with the merged result. Closing the connection drops the orchestration
//! stream, which cancels every provider call still in flight.

use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use domain::{GenerationResult, ModalityUpdate};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tracing::{debug, instrument};

use super::{
    common::{GenerationResponse, UpdateEvent, build_request},
    generate::GenerateTextRequest,
};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Event name for a settled modality
pub const UPDATE_EVENT: &str = "update";
/// Event name for the final merged result
pub const DONE_EVENT: &str = "done";

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

struct Progress {
    updates: BoxStream<'static, ModalityUpdate>,
    result: GenerationResult,
    finished: bool,
}

fn events(
    updates: BoxStream<'static, ModalityUpdate>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    let progress = Progress {
        updates,
        result: GenerationResult::pending(),
        finished: false,
    };

    stream::unfold(progress, |mut progress| async move {
        if progress.finished {
            return None;
        }

        match progress.updates.next().await {
            Some(update) => {
                debug!(modality = %update.modality(), "Streaming update");
                progress.result.apply(update.clone());
                let event = Event::default()
                    .event(UPDATE_EVENT)
                    .json_data(UpdateEvent::from(update));
                Some((event, progress))
            },
            None => {
                progress.finished = true;
                let merged = GenerationResponse::from(progress.result.clone());
                let event = Event::default().event(DONE_EVENT).json_data(merged);
                Some((event, progress))
            },
        }
    })
}

/// Generate all modalities as a stream
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generation",
    request_body = GenerateTextRequest,
    responses(
        (status = 200, description = "`update` events followed by `done`", body = String, content_type = "text/event-stream"),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(prompt_len = request.prompt.len(), tone = %request.tone))]
pub async fn generate_stream(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateTextRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let request = build_request(&request.prompt, &request.tone, request.temperature)?;
    let updates = state.orchestrator.orchestrate(request);

    Ok(Sse::new(events(updates)).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("keep-alive"),
    ))
}
