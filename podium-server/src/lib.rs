//! Podium Server - HTTP facade over the bracket engine
//!
//! This crate exposes the engine's request/response contract:
//! - Bracket generation, retrieval, and reset per event
//! - Result, forfeit, and go-live submission per match
//! - Standings for the league formats
//!
//! The engine itself only sees plain data; swapping the transport means
//! replacing this crate, nothing else.

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8012 }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Bracket lifecycle
        .route(
            "/api/events/:event_id/bracket",
            post(routes::bracket::generate_bracket)
                .get(routes::bracket::get_bracket)
                .delete(routes::bracket::reset_bracket),
        )
        // Match progression
        .route(
            "/api/events/:event_id/matches/:match_id/result",
            post(routes::matches::submit_result),
        )
        .route(
            "/api/events/:event_id/matches/:match_id/forfeit",
            post(routes::matches::submit_forfeit),
        )
        .route(
            "/api/events/:event_id/matches/:match_id/start",
            post(routes::matches::start_match),
        )
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new());
    let router = create_router(state);

    tracing::info!("Podium server starting on http://0.0.0.0:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
