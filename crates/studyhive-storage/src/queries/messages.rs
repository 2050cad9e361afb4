// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat message queries, direct and group.

use chrono::Utc;
use rusqlite::params;
use studyhive_core::StudyhiveError;

use crate::database::{map_tr_err, parse_ts, Database};
use crate::models::{ChatMessage, GroupMessage, NewChatMessage, NewGroupMessage};

/// Persist a direct message and return it with its assigned id.
pub async fn insert_chat_message(
    db: &Database,
    new: NewChatMessage,
) -> Result<ChatMessage, StudyhiveError> {
    let created_at = Utc::now();
    let created_at_str = created_at.to_rfc3339();
    let inserted = new.clone();
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_messages (sender_id, receiver_id, content, content_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.sender_id,
                    new.receiver_id,
                    new.content,
                    new.content_type,
                    created_at_str,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(ChatMessage {
        id,
        sender_id: inserted.sender_id,
        receiver_id: inserted.receiver_id,
        content: inserted.content,
        content_type: inserted.content_type,
        created_at,
    })
}

/// Persist a group message and return it with its assigned id.
pub async fn insert_group_message(
    db: &Database,
    new: NewGroupMessage,
) -> Result<GroupMessage, StudyhiveError> {
    let created_at = Utc::now();
    let created_at_str = created_at.to_rfc3339();
    let inserted = new.clone();
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO group_messages (group_id, sender_id, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![new.group_id, new.sender_id, new.content, created_at_str],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(GroupMessage {
        id,
        group_id: inserted.group_id,
        sender_id: inserted.sender_id,
        content: inserted.content,
        created_at,
    })
}

/// Recent direct messages between two users, oldest first.
pub async fn conversation(
    db: &Database,
    user_a: i64,
    user_b: i64,
    limit: i64,
) -> Result<Vec<ChatMessage>, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, sender_id, receiver_id, content, content_type, created_at
                 FROM chat_messages
                 WHERE (sender_id = ?1 AND receiver_id = ?2)
                    OR (sender_id = ?2 AND receiver_id = ?1)
                 ORDER BY created_at ASC LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![user_a, user_b, limit], |row| {
                Ok(ChatMessage {
                    id: row.get(0)?,
                    sender_id: row.get(1)?,
                    receiver_id: row.get(2)?,
                    content: row.get(3)?,
                    content_type: row.get(4)?,
                    created_at: parse_ts(5, row.get(5)?)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}

/// Recent messages in a group, oldest first.
pub async fn group_history(
    db: &Database,
    group_id: i64,
    limit: i64,
) -> Result<Vec<GroupMessage>, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, group_id, sender_id, content, created_at
                 FROM group_messages WHERE group_id = ?1
                 ORDER BY created_at ASC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![group_id, limit], |row| {
                Ok(GroupMessage {
                    id: row.get(0)?,
                    group_id: row.get(1)?,
                    sender_id: row.get(2)?,
                    content: row.get(3)?,
                    created_at: parse_ts(4, row.get(4)?)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}
