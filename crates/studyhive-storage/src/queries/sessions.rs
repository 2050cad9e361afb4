// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Study session queries.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rusqlite::params;
use studyhive_core::StudyhiveError;

use crate::database::{map_tr_err, parse_ts, Database};
use crate::models::{SessionStatus, StudySession};

/// How far ahead the upcoming-session scan looks. Covers the widest
/// reminder lead (1 day) with an hour of slack.
pub const UPCOMING_LOOKAHEAD_HOURS: i64 = 25;

fn parse_status(idx: usize, raw: String) -> Result<SessionStatus, rusqlite::Error> {
    SessionStatus::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_session(row: &rusqlite::Row<'_>) -> Result<StudySession, rusqlite::Error> {
    Ok(StudySession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        subject: row.get(3)?,
        scheduled_start: parse_ts(4, row.get(4)?)?,
        duration_minutes: row.get(5)?,
        status: parse_status(6, row.get(6)?)?,
    })
}

/// Sessions in the `scheduled` state starting after `now`, within the
/// lookahead window, ordered by start time.
pub async fn upcoming_sessions(
    db: &Database,
    now: DateTime<Utc>,
) -> Result<Vec<StudySession>, StudyhiveError> {
    let lower = now.to_rfc3339();
    let upper = (now + Duration::hours(UPCOMING_LOOKAHEAD_HOURS)).to_rfc3339();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, subject, scheduled_start, duration_minutes, status
                 FROM study_sessions
                 WHERE status = 'scheduled' AND scheduled_start > ?1 AND scheduled_start <= ?2
                 ORDER BY scheduled_start ASC",
            )?;
            let rows = stmt.query_map(params![lower, upper], row_to_session)?;
            let mut sessions = Vec::new();
            for row in rows {
                sessions.push(row?);
            }
            Ok(sessions)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a session by id.
pub async fn get_session(
    db: &Database,
    id: i64,
) -> Result<Option<StudySession>, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, subject, scheduled_start, duration_minutes, status
                 FROM study_sessions WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_session);
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a session and return its assigned id.
///
/// The scheduling API that normally creates sessions is outside this core;
/// this entry point exists for fixtures and operational seeding.
pub async fn insert_session(
    db: &Database,
    user_id: i64,
    title: &str,
    subject: Option<&str>,
    scheduled_start: DateTime<Utc>,
    duration_minutes: i64,
) -> Result<i64, StudyhiveError> {
    let title = title.to_string();
    let subject = subject.map(|s| s.to_string());
    let start = scheduled_start.to_rfc3339();
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO study_sessions
                     (user_id, title, subject, scheduled_start, duration_minutes, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'scheduled', ?6)",
                params![user_id, title, subject, start, duration_minutes, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Update a session's lifecycle status.
pub async fn set_session_status(
    db: &Database,
    id: i64,
    status: SessionStatus,
) -> Result<(), StudyhiveError> {
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE study_sessions SET status = ?1 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
