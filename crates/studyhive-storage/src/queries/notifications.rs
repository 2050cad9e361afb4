// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification and reminder-log queries.

use std::str::FromStr;

use chrono::Utc;
use rusqlite::params;
use studyhive_core::StudyhiveError;

use crate::database::{map_tr_err, parse_ts, Database};
use crate::models::{NewNotification, Notification, NotificationKind, ReminderLead};

fn parse_kind(idx: usize, raw: String) -> Result<NotificationKind, rusqlite::Error> {
    NotificationKind::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_notification(row: &rusqlite::Row<'_>) -> Result<Notification, rusqlite::Error> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: parse_kind(2, row.get(2)?)?,
        title: row.get(3)?,
        message: row.get(4)?,
        related_id: row.get(5)?,
        related_kind: row.get(6)?,
        is_read: row.get(7)?,
        created_at: parse_ts(8, row.get(8)?)?,
    })
}

/// Insert a notification and return it with its assigned id.
pub async fn insert_notification(
    db: &Database,
    new: NewNotification,
) -> Result<Notification, StudyhiveError> {
    let created_at = Utc::now();
    let created_at_str = created_at.to_rfc3339();
    let kind = new.kind;
    let inserted = new.clone();
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO notifications
                     (user_id, kind, title, message, related_id, related_kind, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
                params![
                    new.user_id,
                    new.kind.to_string(),
                    new.title,
                    new.message,
                    new.related_id,
                    new.related_kind,
                    created_at_str,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(Notification {
        id,
        user_id: inserted.user_id,
        kind,
        title: inserted.title,
        message: inserted.message,
        related_id: inserted.related_id,
        related_kind: inserted.related_kind,
        is_read: false,
        created_at,
    })
}

/// Notifications for a user, newest first.
pub async fn notifications_for_user(
    db: &Database,
    user_id: i64,
    limit: Option<i64>,
) -> Result<Vec<Notification>, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, kind, title, message, related_id, related_kind, is_read, created_at
                 FROM notifications WHERE user_id = ?1
                 ORDER BY created_at DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit.unwrap_or(-1)], row_to_notification)?;
            let mut notifications = Vec::new();
            for row in rows {
                notifications.push(row?);
            }
            Ok(notifications)
        })
        .await
        .map_err(map_tr_err)
}

/// Record that a reminder fired for (session, lead).
///
/// Returns `false` when the pair was already recorded. `INSERT OR IGNORE`
/// against the primary key makes the check-and-insert atomic; concurrent
/// callers cannot both observe `true`.
pub async fn mark_reminder_sent(
    db: &Database,
    session_id: i64,
    lead: ReminderLead,
) -> Result<bool, StudyhiveError> {
    let lead = lead.to_string();
    let sent_at = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO reminder_log (session_id, lead, sent_at)
                 VALUES (?1, ?2, ?3)",
                params![session_id, lead, sent_at],
            )?;
            Ok(inserted == 1)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete read notifications created before `cutoff`. Returns rows deleted.
pub async fn delete_read_older_than(
    db: &Database,
    cutoff: chrono::DateTime<Utc>,
) -> Result<u64, StudyhiveError> {
    let cutoff = cutoff.to_rfc3339();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM notifications WHERE is_read = 1 AND created_at < ?1",
                params![cutoff],
            )?;
            Ok(deleted as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Mark a notification read.
pub async fn mark_read(db: &Database, id: i64, user_id: i64) -> Result<(), StudyhiveError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
