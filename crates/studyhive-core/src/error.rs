// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Studyhive backend.

use thiserror::Error;

/// The primary error type used across all Studyhive crates.
#[derive(Debug, Error)]
pub enum StudyhiveError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Real-time hub errors (bind failure, socket errors, room delivery).
    #[error("hub error: {message}")]
    Hub {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Email delivery errors (SMTP connection, rejected message).
    #[error("email error: {message}")]
    Email {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
