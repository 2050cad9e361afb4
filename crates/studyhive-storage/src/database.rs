// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use studyhive_core::StudyhiveError;

/// Handle to the single SQLite connection.
///
/// Opening runs PRAGMA setup and all pending migrations. Query modules
/// accept `&Database` and go through [`Database::connection`].
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and migrate.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, StudyhiveError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;

        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| {
            crate::migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(e.into()))
        })
        .await
        .map_err(map_tr_err)?;

        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn checkpoint(&self) -> Result<(), StudyhiveError> {
        self.conn
            .call(|conn| -> Result<(), tokio_rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Convert a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> StudyhiveError {
    StudyhiveError::Storage {
        source: Box::new(e),
    }
}

/// Parse an RFC 3339 column value into a UTC timestamp.
///
/// Column index is threaded through so a corrupt value surfaces as the usual
/// rusqlite conversion failure instead of a panic.
pub(crate) fn parse_ts(idx: usize, raw: String) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
