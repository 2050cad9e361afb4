// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence contract consumed by the scheduler and the real-time hub.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::StudyhiveError;
use crate::types::{
    ChatMessage, Friend, GroupMessage, NewChatMessage, NewGroupMessage, NewNotification,
    Notification, ReminderLead, StudySession,
};

/// The persistence collaborator for the reminder, chat, and maintenance
/// subsystems.
///
/// The SQLite implementation lives in `studyhive-storage`; tests use the
/// mock in `studyhive-test-utils`.
#[async_trait]
pub trait StudyStore: Send + Sync + 'static {
    /// Sessions in the `scheduled` state starting after `now`, within the
    /// store's lookahead window.
    async fn upcoming_sessions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<StudySession>, StudyhiveError>;

    /// Persist a notification and return it with its assigned id.
    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, StudyhiveError>;

    /// Record that a reminder was sent for (session, lead).
    ///
    /// Returns `false` when the pair was already recorded, which makes the
    /// fire-at-most-once invariant exact regardless of scan cadence.
    async fn mark_reminder_sent(
        &self,
        session_id: i64,
        lead: ReminderLead,
    ) -> Result<bool, StudyhiveError>;

    /// Persist a direct chat message.
    async fn save_message(&self, new: NewChatMessage) -> Result<ChatMessage, StudyhiveError>;

    /// Persist a group chat message.
    async fn save_group_message(
        &self,
        new: NewGroupMessage,
    ) -> Result<GroupMessage, StudyhiveError>;

    /// Accepted friends of `user_id` (for friend-started-study fan-out).
    async fn studying_friends(&self, user_id: i64) -> Result<Vec<Friend>, StudyhiveError>;

    /// Email address of `user_id`, when one is on file.
    async fn user_email(&self, user_id: i64) -> Result<Option<String>, StudyhiveError>;

    /// Whether `user_id` belongs to `group_id`.
    async fn is_group_member(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<bool, StudyhiveError>;

    /// Recompute every user's streak from completed sessions.
    /// Returns the number of streak rows written.
    async fn update_all_streaks(&self) -> Result<u64, StudyhiveError>;

    /// Generate per-user daily reports for `date`.
    /// Returns the number of reports written.
    async fn generate_daily_reports(&self, date: NaiveDate) -> Result<u64, StudyhiveError>;

    /// Delete read notifications older than `older_than_days`.
    /// Returns the number of rows deleted.
    async fn cleanup_old_notifications(&self, older_than_days: u32)
        -> Result<u64, StudyhiveError>;
}
