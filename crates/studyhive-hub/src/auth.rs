// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handshake authentication for WebSocket connections.
//!
//! Identity is attached at connection time: the client presents the shared
//! bearer token plus the user id it claims, and every later event is checked
//! against that id. When no token is configured, all connections are
//! rejected (fail-closed).

/// Authentication configuration for the hub.
#[derive(Clone)]
pub struct HubAuth {
    /// Expected bearer token. If `None`, all connections are rejected.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for HubAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubAuth")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl HubAuth {
    /// Validate handshake credentials and return the authenticated user id.
    pub fn authenticate(&self, token: Option<&str>, user_id: Option<i64>) -> Option<i64> {
        let expected = self.bearer_token.as_deref()?;
        let presented = token?;
        if presented != expected {
            return None;
        }
        user_id.filter(|id| *id > 0)
    }
}
