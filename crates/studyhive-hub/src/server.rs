// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hub HTTP server built on axum.
//!
//! Serves the WebSocket endpoint plus an unauthenticated health route for
//! process supervisors.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use studyhive_core::{StudyStore, StudyhiveError};

use crate::auth::HubAuth;
use crate::rooms::Rooms;
use crate::ws;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct HubState {
    /// Room registry shared with the reminder dispatcher.
    pub rooms: Arc<Rooms>,
    /// Persistence collaborator for chat and membership lookups.
    pub store: Arc<dyn StudyStore>,
    /// Handshake authentication configuration.
    pub auth: HubAuth,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Hub server configuration (mirrors the `[server]` section of studyhive-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

/// GET /health -- unauthenticated liveness probe.
async fn get_health(State(state): State<HubState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Start the hub HTTP/WebSocket server.
///
/// Binds to the configured host:port and serves:
/// - GET /health (unauthenticated)
/// - GET /ws (auth via handshake query params, not middleware)
pub async fn start_server(config: &ServerConfig, state: HubState) -> Result<(), StudyhiveError> {
    let app = Router::new()
        .route("/health", get(get_health))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StudyhiveError::Hub {
            message: format!("failed to bind hub to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("hub listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| StudyhiveError::Hub {
            message: format!("hub server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
