//! Bracket lifecycle endpoints
//!
//! Generation, retrieval, and reset of one event's bracket.

use crate::routes::error_response;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use podium_core::{CompetitorId, EventFormat, SeedEntry, SeriesFormat};
use podium_engine::{GenerateConfig, SeedingPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

type ApiError = (StatusCode, Json<Value>);

/// One competitor in a generation request.
#[derive(Deserialize)]
pub struct TeamEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub rating: Option<u32>,
}

/// Generation request body. Format and policy arrive as strings so an
/// unknown value surfaces as the engine's own validation error rather
/// than a deserializer rejection.
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub teams: Vec<TeamEntry>,
    pub format: String,
    #[serde(default)]
    pub seeding_policy: Option<String>,
    #[serde(default)]
    pub series_format: Option<String>,
    #[serde(default)]
    pub finals_series_format: Option<String>,
    #[serde(default)]
    pub swiss_rounds: Option<usize>,
    #[serde(default)]
    pub bracket_reset_enabled: Option<bool>,
    /// Seed for the random seeding policy; omitted means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn parse_series(s: &str) -> Result<SeriesFormat, ApiError> {
    s.parse::<SeriesFormat>().map_err(|msg| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": msg })),
        )
    })
}

fn build_config(req: &GenerateRequest) -> Result<GenerateConfig, ApiError> {
    let format: EventFormat = req.format.parse().map_err(error_response)?;
    let mut config = GenerateConfig::new(format);
    if let Some(policy) = &req.seeding_policy {
        config.seeding_policy = policy.parse::<SeedingPolicy>().map_err(error_response)?;
    }
    if let Some(series) = &req.series_format {
        config.series = parse_series(series)?;
    }
    if let Some(series) = &req.finals_series_format {
        config.finals_series = parse_series(series)?;
    }
    if let Some(rounds) = req.swiss_rounds {
        config.swiss_rounds = Some(rounds);
    }
    if let Some(enabled) = req.bracket_reset_enabled {
        config.bracket_reset = enabled;
    }
    Ok(config)
}

/// Generate (or regenerate) an event's bracket.
pub async fn generate_bracket(
    State(state): State<Arc<ServerState>>,
    Path(event_id): Path<String>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let config = build_config(&req)?;
    let entries: Vec<SeedEntry> = req
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| SeedEntry {
            competitor_id: CompetitorId(t.id),
            display_name: t.name.clone(),
            seed_rank: i as u32 + 1,
            rating: t.rating,
        })
        .collect();
    let mut rng = match req.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut store = state.store.write().unwrap();
    let graph = store
        .generate(&event_id, &entries, &config, &mut rng)
        .map_err(error_response)?;

    tracing::info!(
        "generated {} bracket for event {} ({} teams, {} matches)",
        graph.format,
        event_id,
        graph.entrants.len(),
        graph.total_matches()
    );
    Ok(Json(json!({
        "event_id": event_id,
        "bracket": graph,
        "total_matches": graph.total_matches(),
    })))
}

/// Current bracket, plus standings for the league formats.
pub async fn get_bracket(
    State(state): State<Arc<ServerState>>,
    Path(event_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.read().unwrap();
    let graph = store.get(&event_id).map_err(error_response)?;

    let standings = match graph.format {
        EventFormat::Swiss | EventFormat::RoundRobin => {
            Some(podium_engine::recompute(graph))
        }
        _ => None,
    };
    Ok(Json(json!({
        "event_id": event_id,
        "bracket": graph,
        "total_matches": graph.total_matches(),
        "standings": standings,
    })))
}

/// Discard an event's bracket; resetting twice is a no-op.
pub async fn reset_bracket(
    State(state): State<Arc<ServerState>>,
    Path(event_id): Path<String>,
) -> Json<Value> {
    let removed = state.store.write().unwrap().reset(&event_id);
    Json(json!({
        "event_id": event_id,
        "reset": removed,
    }))
}
