// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock store with injectable fixtures and failure toggles.
//!
//! Fixtures are injected with the `add_*` methods; writes are captured for
//! assertion; each write path has a failure toggle so tests can verify
//! error isolation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use studyhive_core::types::{
    ChatMessage, Friend, GroupMessage, NewChatMessage, NewGroupMessage, NewNotification,
    Notification, ReminderLead, StudySession,
};
use studyhive_core::{StudyStore, StudyhiveError};

fn store_failure(what: &str) -> StudyhiveError {
    StudyhiveError::Storage {
        source: format!("mock store failure: {what}").into(),
    }
}

/// A deterministic in-memory [`StudyStore`].
#[derive(Default)]
pub struct MockStore {
    sessions: Mutex<Vec<StudySession>>,
    notifications: Mutex<Vec<Notification>>,
    reminder_log: Mutex<HashSet<(i64, ReminderLead)>>,
    chat_messages: Mutex<Vec<ChatMessage>>,
    group_messages: Mutex<Vec<GroupMessage>>,
    friends: Mutex<HashMap<i64, Vec<Friend>>>,
    emails: Mutex<HashMap<i64, String>>,
    group_members: Mutex<HashSet<(i64, i64)>>,
    next_id: AtomicI64,

    streak_runs: AtomicU64,
    report_runs: AtomicU64,
    cleanup_runs: AtomicU64,

    fail_sessions: AtomicBool,
    fail_notifications: AtomicBool,
    fail_saves: AtomicBool,
    fail_streaks: AtomicBool,
    fail_reports: AtomicBool,
    fail_cleanup: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    // --- Fixture injection ---

    /// Inject an upcoming session.
    pub async fn add_session(&self, session: StudySession) {
        self.sessions.lock().await.push(session);
    }

    /// Inject an accepted friendship edge from `user_id` to `friend_id`.
    pub async fn add_friend(&self, user_id: i64, friend_id: i64, username: &str) {
        self.friends.lock().await.entry(user_id).or_default().push(Friend {
            user_id: friend_id,
            username: username.to_string(),
        });
    }

    /// Inject a group membership.
    pub async fn add_group_member(&self, group_id: i64, user_id: i64) {
        self.group_members.lock().await.insert((group_id, user_id));
    }

    /// Put an email address on file for a user.
    pub async fn set_user_email(&self, user_id: i64, email: &str) {
        self.emails.lock().await.insert(user_id, email.to_string());
    }

    // --- Captured writes ---

    /// All notifications created through the store.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }

    /// All direct messages saved through the store.
    pub async fn chat_messages(&self) -> Vec<ChatMessage> {
        self.chat_messages.lock().await.clone()
    }

    /// All group messages saved through the store.
    pub async fn group_messages(&self) -> Vec<GroupMessage> {
        self.group_messages.lock().await.clone()
    }

    /// Number of completed streak-recompute runs.
    pub fn streak_runs(&self) -> u64 {
        self.streak_runs.load(Ordering::SeqCst)
    }

    /// Number of completed report-generation runs.
    pub fn report_runs(&self) -> u64 {
        self.report_runs.load(Ordering::SeqCst)
    }

    /// Number of completed cleanup runs.
    pub fn cleanup_runs(&self) -> u64 {
        self.cleanup_runs.load(Ordering::SeqCst)
    }

    // --- Failure toggles ---

    pub fn fail_sessions(&self, fail: bool) {
        self.fail_sessions.store(fail, Ordering::SeqCst);
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.fail_notifications.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_streaks(&self, fail: bool) {
        self.fail_streaks.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reports(&self, fail: bool) {
        self.fail_reports.store(fail, Ordering::SeqCst);
    }

    pub fn fail_cleanup(&self, fail: bool) {
        self.fail_cleanup.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StudyStore for MockStore {
    async fn upcoming_sessions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<StudySession>, StudyhiveError> {
        if self.fail_sessions.load(Ordering::SeqCst) {
            return Err(store_failure("upcoming_sessions"));
        }
        Ok(self
            .sessions
            .lock()
            .await
            .iter()
            .filter(|s| s.scheduled_start > now)
            .cloned()
            .collect())
    }

    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, StudyhiveError> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(store_failure("create_notification"));
        }
        let notification = Notification {
            id: self.assign_id(),
            user_id: new.user_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            related_id: new.related_id,
            related_kind: new.related_kind,
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().await.push(notification.clone());
        Ok(notification)
    }

    async fn mark_reminder_sent(
        &self,
        session_id: i64,
        lead: ReminderLead,
    ) -> Result<bool, StudyhiveError> {
        Ok(self.reminder_log.lock().await.insert((session_id, lead)))
    }

    async fn save_message(&self, new: NewChatMessage) -> Result<ChatMessage, StudyhiveError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(store_failure("save_message"));
        }
        let message = ChatMessage {
            id: self.assign_id(),
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            content: new.content,
            content_type: new.content_type,
            created_at: Utc::now(),
        };
        self.chat_messages.lock().await.push(message.clone());
        Ok(message)
    }

    async fn save_group_message(
        &self,
        new: NewGroupMessage,
    ) -> Result<GroupMessage, StudyhiveError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(store_failure("save_group_message"));
        }
        let message = GroupMessage {
            id: self.assign_id(),
            group_id: new.group_id,
            sender_id: new.sender_id,
            content: new.content,
            created_at: Utc::now(),
        };
        self.group_messages.lock().await.push(message.clone());
        Ok(message)
    }

    async fn studying_friends(&self, user_id: i64) -> Result<Vec<Friend>, StudyhiveError> {
        Ok(self
            .friends
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn user_email(&self, user_id: i64) -> Result<Option<String>, StudyhiveError> {
        Ok(self.emails.lock().await.get(&user_id).cloned())
    }

    async fn is_group_member(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<bool, StudyhiveError> {
        Ok(self.group_members.lock().await.contains(&(group_id, user_id)))
    }

    async fn update_all_streaks(&self) -> Result<u64, StudyhiveError> {
        if self.fail_streaks.load(Ordering::SeqCst) {
            return Err(store_failure("update_all_streaks"));
        }
        self.streak_runs.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn generate_daily_reports(&self, _date: NaiveDate) -> Result<u64, StudyhiveError> {
        if self.fail_reports.load(Ordering::SeqCst) {
            return Err(store_failure("generate_daily_reports"));
        }
        self.report_runs.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn cleanup_old_notifications(
        &self,
        _older_than_days: u32,
    ) -> Result<u64, StudyhiveError> {
        if self.fail_cleanup.load(Ordering::SeqCst) {
            return Err(store_failure("cleanup_old_notifications"));
        }
        self.cleanup_runs.fetch_add(1, Ordering::SeqCst);
        Ok(0)
    }
}

/// Build a `scheduled` session fixture starting at `start`.
pub fn session_fixture(id: i64, user_id: i64, title: &str, start: DateTime<Utc>) -> StudySession {
    StudySession {
        id,
        user_id,
        title: title.to_string(),
        subject: None,
        scheduled_start: start,
        duration_minutes: 60,
        status: studyhive_core::types::SessionStatus::Scheduled,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn upcoming_sessions_filters_past_fixtures() {
        let store = MockStore::new();
        let now = Utc::now();
        store
            .add_session(session_fixture(1, 1, "future", now + Duration::hours(1)))
            .await;
        store
            .add_session(session_fixture(2, 1, "past", now - Duration::hours(1)))
            .await;

        let upcoming = store.upcoming_sessions(now).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "future");
    }

    #[tokio::test]
    async fn reminder_log_dedupes_pairs() {
        let store = MockStore::new();
        assert!(store
            .mark_reminder_sent(1, ReminderLead::OneHour)
            .await
            .unwrap());
        assert!(!store
            .mark_reminder_sent(1, ReminderLead::OneHour)
            .await
            .unwrap());
        assert!(store
            .mark_reminder_sent(1, ReminderLead::OneDay)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn failure_toggles_are_independent() {
        let store = MockStore::new();
        store.fail_streaks(true);
        assert!(store.update_all_streaks().await.is_err());
        assert!(store
            .generate_daily_reports(Utc::now().date_naive())
            .await
            .is_ok());
        assert_eq!(store.report_runs(), 1);
    }
}
