use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::time::Duration;

use crate::errors::AppError;
use crate::models::{StreamProgress, TimedEvent};
use crate::schema::{SchemaAdapter, SourceKind};
use crate::state::AppState;
use crate::stream::replay::{replay, ReplayOutcome};
use crate::stream::reporter::ProgressReporter;

/// Upper bound on a per-request throttle override.
const MAX_THROTTLE_MS: u64 = 10_000;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub buffer: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplayRequest {
    pub events: Vec<TimedEvent>,
    /// Overrides the configured throttle interval for this replay.
    pub throttle_ms: Option<u64>,
}

/// GET /api/v1/schemas/:source
pub async fn handle_get_schema(
    Path(source): Path<String>,
) -> Result<Json<&'static SchemaAdapter>, AppError> {
    let source: SourceKind = source.parse()?;
    Ok(Json(SchemaAdapter::for_source(source)))
}

/// POST /api/v1/streams/:source/extract
///
/// Treats `buffer` as everything streamed so far and returns the snapshot a client
/// would see for it.
pub async fn handle_extract(
    Path(source): Path<String>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<StreamProgress>, AppError> {
    let source: SourceKind = source.parse()?;
    let mut reporter = ProgressReporter::new(source);
    let progress = reporter
        .on_token(&req.buffer)
        .unwrap_or_else(|| reporter.snapshot());
    Ok(Json(progress))
}

/// POST /api/v1/streams/:source/replay
pub async fn handle_replay(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Json(req): Json<ReplayRequest>,
) -> Result<Json<ReplayOutcome>, AppError> {
    let source: SourceKind = source.parse()?;
    validate_replay(&req, state.config.replay_max_events)?;

    let interval = req
        .throttle_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| state.config.throttle_interval());

    Ok(Json(replay(source, interval, req.events)))
}

fn validate_replay(req: &ReplayRequest, max_events: usize) -> Result<(), AppError> {
    if req.events.len() > max_events {
        return Err(AppError::Validation(format!(
            "Replay log has {} events; the limit is {max_events}",
            req.events.len()
        )));
    }
    if let Some(ms) = req.throttle_ms {
        if ms > MAX_THROTTLE_MS {
            return Err(AppError::Validation(format!(
                "throttle_ms must be at most {MAX_THROTTLE_MS}"
            )));
        }
    }
    if let Some(i) = req
        .events
        .windows(2)
        .position(|pair| pair[1].at_ms < pair[0].at_ms)
    {
        return Err(AppError::Validation(format!(
            "Event {} goes back in time ({}ms after {}ms)",
            i + 1,
            req.events[i + 1].at_ms,
            req.events[i].at_ms
        )));
    }
    Ok(())
}
