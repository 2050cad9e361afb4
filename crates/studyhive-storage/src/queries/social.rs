// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User, friendship, and study-group queries.

use chrono::Utc;
use rusqlite::params;
use studyhive_core::StudyhiveError;

use crate::database::{map_tr_err, Database};
use crate::models::Friend;

/// Insert a user and return its assigned id.
pub async fn insert_user(
    db: &Database,
    username: &str,
    display_name: &str,
    email: Option<&str>,
) -> Result<i64, StudyhiveError> {
    let username = username.to_string();
    let display_name = display_name.to_string();
    let email = email.map(|e| e.to_string());
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (username, display_name, email, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![username, display_name, email, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Email address on file for a user, if any.
pub async fn user_email(db: &Database, user_id: i64) -> Result<Option<String>, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT email FROM users WHERE id = ?1",
                params![user_id],
                |row| row.get::<_, Option<String>>(0),
            );
            match result {
                Ok(email) => Ok(email),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Record an accepted friendship in both directions.
///
/// The friendships table is directional; the studying-friends lookup only
/// follows outgoing edges, so an accepted pair writes two rows.
pub async fn add_friendship(
    db: &Database,
    user_id: i64,
    friend_id: i64,
) -> Result<(), StudyhiveError> {
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR REPLACE INTO friendships (user_id, friend_id, status, created_at)
                 VALUES (?1, ?2, 'accepted', ?3)",
                params![user_id, friend_id, now],
            )?;
            tx.execute(
                "INSERT OR REPLACE INTO friendships (user_id, friend_id, status, created_at)
                 VALUES (?1, ?2, 'accepted', ?3)",
                params![friend_id, user_id, now],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Accepted friends of `user_id`.
pub async fn studying_friends(
    db: &Database,
    user_id: i64,
) -> Result<Vec<Friend>, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.username
                 FROM friendships f JOIN users u ON u.id = f.friend_id
                 WHERE f.user_id = ?1 AND f.status = 'accepted'
                 ORDER BY u.username ASC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(Friend {
                    user_id: row.get(0)?,
                    username: row.get(1)?,
                })
            })?;
            let mut friends = Vec::new();
            for row in rows {
                friends.push(row?);
            }
            Ok(friends)
        })
        .await
        .map_err(map_tr_err)
}

/// Create a study group owned by `owner_id` and return its id.
/// The owner becomes the first member.
pub async fn insert_group(
    db: &Database,
    name: &str,
    owner_id: i64,
) -> Result<i64, StudyhiveError> {
    let name = name.to_string();
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO study_groups (name, owner_id, created_at) VALUES (?1, ?2, ?3)",
                params![name, owner_id, now],
            )?;
            let group_id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO group_members (group_id, user_id, joined_at) VALUES (?1, ?2, ?3)",
                params![group_id, owner_id, now],
            )?;
            tx.commit()?;
            Ok(group_id)
        })
        .await
        .map_err(map_tr_err)
}

/// Add a user to a group (idempotent).
pub async fn add_group_member(
    db: &Database,
    group_id: i64,
    user_id: i64,
) -> Result<(), StudyhiveError> {
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO group_members (group_id, user_id, joined_at)
                 VALUES (?1, ?2, ?3)",
                params![group_id, user_id, now],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Whether `user_id` belongs to `group_id`.
pub async fn is_group_member(
    db: &Database,
    group_id: i64,
    user_id: i64,
) -> Result<bool, StudyhiveError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT 1 FROM group_members WHERE group_id = ?1 AND user_id = ?2",
            )?;
            Ok(stmt.exists(params![group_id, user_id])?)
        })
        .await
        .map_err(map_tr_err)
}
