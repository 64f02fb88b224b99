//! API route handlers

pub mod bracket;
pub mod matches;
pub mod status;

use axum::http::StatusCode;
use axum::Json;
use podium_core::BracketError;
use serde_json::{json, Value};

/// Map an engine error onto the wire: validation mistakes are the
/// caller's (400), version races are retryable (409), unknown ids are
/// 404, anything structural is a server fault (500).
pub(crate) fn error_response(err: BracketError) -> (StatusCode, Json<Value>) {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_concurrency() {
        StatusCode::CONFLICT
    } else if matches!(
        err,
        BracketError::MatchNotFound(_) | BracketError::EventNotFound(_)
    ) {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": err.to_string() })))
}
