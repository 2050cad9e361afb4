// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Real-time hub for the Studyhive backend.
//!
//! Maintains per-user and per-group broadcast rooms, relays chat messages
//! and presence events between connected clients, and delivers reminder
//! notifications pushed by the scheduler. Rooms are an explicit hub-owned
//! map from room id to broadcast channel; membership is set only by
//! explicit join events and never survives a reconnect.

pub mod auth;
pub mod events;
pub mod rooms;
pub mod server;
pub mod ws;

use std::sync::Arc;

use tokio::task::JoinHandle;

use studyhive_core::{StudyStore, StudyhiveError};

use crate::auth::HubAuth;
use crate::rooms::Rooms;
use crate::server::{HubState, ServerConfig};

/// Hub configuration.
///
/// Mirrors the `[server]` section of `studyhive-config` to avoid a
/// dependency on the config crate from this crate.
#[derive(Clone)]
pub struct HubConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Shared bearer token checked at WebSocket handshake.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// The real-time hub: room registry plus the axum server that feeds it.
pub struct Hub {
    config: HubConfig,
    rooms: Arc<Rooms>,
    store: Arc<dyn StudyStore>,
}

impl Hub {
    /// Create a hub over the given store. No server is started yet.
    pub fn new(config: HubConfig, store: Arc<dyn StudyStore>) -> Self {
        Self {
            config,
            rooms: Arc::new(Rooms::new()),
            store,
        }
    }

    /// Handle to the room registry, for publishers like the reminder
    /// dispatcher.
    pub fn rooms(&self) -> Arc<Rooms> {
        Arc::clone(&self.rooms)
    }

    /// Bind and serve the WebSocket endpoint as a background task.
    ///
    /// The bind happens inside the task, so a bind failure is logged there;
    /// the caller aborts the returned handle on shutdown.
    pub fn serve(&self) -> JoinHandle<Result<(), StudyhiveError>> {
        let server_config = ServerConfig {
            host: self.config.host.clone(),
            port: self.config.port,
        };
        let state = HubState {
            rooms: Arc::clone(&self.rooms),
            store: Arc::clone(&self.store),
            auth: HubAuth {
                bearer_token: self.config.bearer_token.clone(),
            },
            start_time: std::time::Instant::now(),
        };
        tokio::spawn(async move {
            let result = server::start_server(&server_config, state).await;
            if let Err(ref e) = result {
                tracing::error!("hub server error: {e}");
            }
            result
        })
    }
}
