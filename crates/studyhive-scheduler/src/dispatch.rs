// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatch: persist, best-effort email, room publish.

use std::sync::Arc;

use tracing::{debug, error, info};

use studyhive_core::types::{NewNotification, NotificationKind, ReminderLead, StudySession};
use studyhive_core::{Mailer, StudyStore};
use studyhive_hub::events::ServerEvent;
use studyhive_hub::rooms::{RoomId, Rooms};

/// Title shared by every session-reminder notification.
pub const REMINDER_TITLE: &str = "Study Session Reminder";

/// Turns a matched (session, lead) pair into user-visible notifications.
///
/// Three steps run in a fixed order, each isolated: persistence first
/// because it is the durable record, then email and the real-time publish
/// as best-effort enhancements. A failure in any step is logged and does
/// not prevent the remaining steps.
pub struct ReminderDispatcher {
    store: Arc<dyn StudyStore>,
    rooms: Arc<Rooms>,
    /// `None` when email dispatch is disabled by configuration.
    mailer: Option<Arc<dyn Mailer>>,
}

impl ReminderDispatcher {
    pub fn new(
        store: Arc<dyn StudyStore>,
        rooms: Arc<Rooms>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            store,
            rooms,
            mailer,
        }
    }

    /// Dispatch one reminder. Never fails: each step is caught and logged
    /// here, and the scanner moves on to the next session either way.
    pub async fn dispatch(&self, session: &StudySession, lead: ReminderLead) {
        let message = format!("\"{}\" starts in {}", session.title, lead.label());

        // 1. Durable record.
        let new = NewNotification {
            user_id: session.user_id,
            kind: NotificationKind::SessionReminder,
            title: REMINDER_TITLE.to_string(),
            message: message.clone(),
            related_id: Some(session.id),
            related_kind: Some("study_session".to_string()),
        };
        if let Err(e) = self.store.create_notification(new).await {
            error!(session_id = session.id, lead = %lead, "failed to persist reminder: {e}");
        }

        // 2. Best-effort email.
        if let Some(mailer) = &self.mailer {
            self.send_email(mailer.as_ref(), session, lead).await;
        }

        // 3. Real-time publish to the owner's room. Zero receivers just
        // means the user is not connected right now.
        let delivered = self.rooms.publish(
            RoomId::User(session.user_id),
            ServerEvent::Reminder {
                title: REMINDER_TITLE.to_string(),
                message,
                session_id: session.id,
            },
        );

        info!(
            session_id = session.id,
            user_id = session.user_id,
            lead = %lead,
            delivered,
            "reminder dispatched"
        );
    }

    async fn send_email(&self, mailer: &dyn Mailer, session: &StudySession, lead: ReminderLead) {
        let address = match self.store.user_email(session.user_id).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                debug!(user_id = session.user_id, "no email on file, skipping reminder email");
                return;
            }
            Err(e) => {
                error!(user_id = session.user_id, "email lookup failed: {e}");
                return;
            }
        };
        if let Err(e) = mailer.send_reminder(&address, session, lead).await {
            error!(session_id = session.id, lead = %lead, "reminder email failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use studyhive_test_utils::{session_fixture, MockMailer, MockStore};

    use super::*;

    struct Fixture {
        store: Arc<MockStore>,
        rooms: Arc<Rooms>,
        mailer: Arc<MockMailer>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(MockStore::new()),
                rooms: Arc::new(Rooms::new()),
                mailer: Arc::new(MockMailer::new()),
            }
        }

        fn dispatcher(&self, with_mailer: bool) -> ReminderDispatcher {
            ReminderDispatcher::new(
                Arc::clone(&self.store) as Arc<dyn StudyStore>,
                Arc::clone(&self.rooms),
                with_mailer.then(|| Arc::clone(&self.mailer) as Arc<dyn Mailer>),
            )
        }
    }

    fn session() -> studyhive_core::types::StudySession {
        session_fixture(3, 42, "Calculus", Utc::now() + Duration::minutes(15))
    }

    #[tokio::test]
    async fn dispatch_persists_notification_with_session_reference() {
        let fx = Fixture::new();
        fx.dispatcher(false)
            .dispatch(&session(), ReminderLead::FifteenMinutes)
            .await;

        let notifications = fx.store.notifications().await;
        assert_eq!(notifications.len(), 1);
        let n = &notifications[0];
        assert_eq!(n.user_id, 42);
        assert_eq!(n.kind, NotificationKind::SessionReminder);
        assert_eq!(n.title, REMINDER_TITLE);
        assert_eq!(n.message, "\"Calculus\" starts in 15 minutes");
        assert_eq!(n.related_id, Some(3));
        assert_eq!(n.related_kind.as_deref(), Some("study_session"));
    }

    #[tokio::test]
    async fn dispatch_publishes_to_owner_room_only() {
        let fx = Fixture::new();
        let mut owner_room = fx.rooms.subscribe(RoomId::User(42));
        let mut other_room = fx.rooms.subscribe(RoomId::User(7));

        fx.dispatcher(false)
            .dispatch(&session(), ReminderLead::OneHour)
            .await;

        match owner_room.recv().await.unwrap() {
            ServerEvent::Reminder {
                title,
                message,
                session_id,
            } => {
                assert_eq!(title, REMINDER_TITLE);
                assert_eq!(message, "\"Calculus\" starts in 1 hour");
                assert_eq!(session_id, 3);
            }
            other => panic!("expected reminder, got {other:?}"),
        }
        assert!(other_room.try_recv().is_err());
    }

    #[tokio::test]
    async fn email_sent_when_enabled_and_address_on_file() {
        let fx = Fixture::new();
        fx.store.set_user_email(42, "ada@example.com").await;

        fx.dispatcher(true)
            .dispatch(&session(), ReminderLead::OneDay)
            .await;

        let sent = fx.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ada@example.com");
        assert_eq!(sent[0].1, 3);
    }

    #[tokio::test]
    async fn missing_address_skips_email_silently() {
        let fx = Fixture::new();
        fx.dispatcher(true)
            .dispatch(&session(), ReminderLead::OneDay)
            .await;
        assert!(fx.mailer.sent().await.is_empty());
        // The durable record still exists.
        assert_eq!(fx.store.notifications().await.len(), 1);
    }

    #[tokio::test]
    async fn email_failure_does_not_block_room_publish() {
        let fx = Fixture::new();
        fx.store.set_user_email(42, "ada@example.com").await;
        fx.mailer.fail_sends(true);
        let mut owner_room = fx.rooms.subscribe(RoomId::User(42));

        fx.dispatcher(true)
            .dispatch(&session(), ReminderLead::FifteenMinutes)
            .await;

        assert!(matches!(
            owner_room.recv().await.unwrap(),
            ServerEvent::Reminder { session_id: 3, .. }
        ));
    }

    #[tokio::test]
    async fn persistence_failure_does_not_block_room_publish() {
        let fx = Fixture::new();
        fx.store.fail_notifications(true);
        let mut owner_room = fx.rooms.subscribe(RoomId::User(42));

        fx.dispatcher(false)
            .dispatch(&session(), ReminderLead::FifteenMinutes)
            .await;

        assert!(fx.store.notifications().await.is_empty());
        assert!(matches!(
            owner_room.recv().await.unwrap(),
            ServerEvent::Reminder { .. }
        ));
    }
}
