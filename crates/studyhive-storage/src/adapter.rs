// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StudyStore trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use studyhive_config::model::StorageConfig;
use studyhive_core::types::{
    ChatMessage, Friend, GroupMessage, NewChatMessage, NewGroupMessage, NewNotification,
    Notification, ReminderLead, StudySession,
};
use studyhive_core::{StudyStore, StudyhiveError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database, apply PRAGMAs, and run migrations.
    pub async fn initialize(&self) -> Result<(), StudyhiveError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| StudyhiveError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and flush pending writes before shutdown.
    pub async fn close(&self) -> Result<(), StudyhiveError> {
        self.database()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// The underlying database handle, for fixtures and seeding.
    pub fn database(&self) -> Result<&Database, StudyhiveError> {
        self.db.get().ok_or_else(|| StudyhiveError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl StudyStore for SqliteStore {
    async fn upcoming_sessions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<StudySession>, StudyhiveError> {
        queries::sessions::upcoming_sessions(self.database()?, now).await
    }

    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, StudyhiveError> {
        queries::notifications::insert_notification(self.database()?, new).await
    }

    async fn mark_reminder_sent(
        &self,
        session_id: i64,
        lead: ReminderLead,
    ) -> Result<bool, StudyhiveError> {
        queries::notifications::mark_reminder_sent(self.database()?, session_id, lead).await
    }

    async fn save_message(&self, new: NewChatMessage) -> Result<ChatMessage, StudyhiveError> {
        queries::messages::insert_chat_message(self.database()?, new).await
    }

    async fn save_group_message(
        &self,
        new: NewGroupMessage,
    ) -> Result<GroupMessage, StudyhiveError> {
        queries::messages::insert_group_message(self.database()?, new).await
    }

    async fn studying_friends(&self, user_id: i64) -> Result<Vec<Friend>, StudyhiveError> {
        queries::social::studying_friends(self.database()?, user_id).await
    }

    async fn user_email(&self, user_id: i64) -> Result<Option<String>, StudyhiveError> {
        queries::social::user_email(self.database()?, user_id).await
    }

    async fn is_group_member(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<bool, StudyhiveError> {
        queries::social::is_group_member(self.database()?, group_id, user_id).await
    }

    async fn update_all_streaks(&self) -> Result<u64, StudyhiveError> {
        queries::maintenance::update_all_streaks(self.database()?, Utc::now().date_naive()).await
    }

    async fn generate_daily_reports(&self, date: NaiveDate) -> Result<u64, StudyhiveError> {
        queries::maintenance::generate_daily_reports(self.database()?, date).await
    }

    async fn cleanup_old_notifications(
        &self,
        older_than_days: u32,
    ) -> Result<u64, StudyhiveError> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(older_than_days));
        queries::notifications::delete_read_older_than(self.database()?, cutoff).await
    }
}
