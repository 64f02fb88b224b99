//! Match progression endpoints
//!
//! Result and forfeit submission plus the ready -> live transition.
//! Every write carries the caller's expected version; a lost race comes
//! back as 409 with the current version for re-fetch and retry.

use crate::routes::error_response;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use podium_core::MatchId;
use podium_engine::SubmitOutcome;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

type ApiError = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub struct ResultRequest {
    pub score_a: u8,
    pub score_b: u8,
    pub expected_version: u64,
}

#[derive(Deserialize)]
pub struct ForfeitRequest {
    pub forfeiting_side: podium_core::SlotSide,
    pub expected_version: u64,
}

#[derive(Deserialize)]
pub struct StartRequest {
    pub expected_version: u64,
}

fn outcome_body(event_id: String, outcome: SubmitOutcome) -> Json<Value> {
    Json(json!({
        "event_id": event_id,
        "match": outcome.updated,
        "newly_ready": outcome.newly_ready,
        "newly_created": outcome.newly_created,
        "standings": outcome.standings,
        "is_complete": outcome.is_complete,
    }))
}

/// Record a decisive series result.
pub async fn submit_result(
    State(state): State<Arc<ServerState>>,
    Path((event_id, match_id)): Path<(String, u32)>,
    Json(req): Json<ResultRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .store
        .write()
        .unwrap()
        .submit_result(
            &event_id,
            MatchId(match_id),
            req.score_a,
            req.score_b,
            req.expected_version,
        )
        .map_err(error_response)?;
    tracing::debug!(
        "event {} match M{} completed {}-{}",
        event_id,
        match_id,
        req.score_a,
        req.score_b
    );
    Ok(outcome_body(event_id, outcome))
}

/// Record a forfeit; the other side advances.
pub async fn submit_forfeit(
    State(state): State<Arc<ServerState>>,
    Path((event_id, match_id)): Path<(String, u32)>,
    Json(req): Json<ForfeitRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .store
        .write()
        .unwrap()
        .submit_forfeit(
            &event_id,
            MatchId(match_id),
            req.forfeiting_side,
            req.expected_version,
        )
        .map_err(error_response)?;
    Ok(outcome_body(event_id, outcome))
}

/// Mark a ready match as live for score entry.
pub async fn start_match(
    State(state): State<Arc<ServerState>>,
    Path((event_id, match_id)): Path<(String, u32)>,
    Json(req): Json<StartRequest>,
) -> Result<Json<Value>, ApiError> {
    let updated = state
        .store
        .write()
        .unwrap()
        .start_match(&event_id, MatchId(match_id), req.expected_version)
        .map_err(error_response)?;
    Ok(Json(json!({
        "event_id": event_id,
        "match": updated,
    })))
}
