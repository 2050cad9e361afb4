// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder scanner: the periodic tick over upcoming sessions.

use std::sync::Arc;

use tracing::{debug, error};

use studyhive_core::{Clock, StudyStore, StudyhiveError};

use crate::dispatch::ReminderDispatcher;
use crate::lead::leads_for;

/// Scans upcoming sessions and hands matched (session, lead) pairs to the
/// dispatcher.
///
/// The scanner is stateless between ticks: window matching plus the store's
/// reminder log decide what fires, so a crashed or delayed tick never causes
/// duplicates, only (at worst) a missed window. Time comes from an injected
/// [`Clock`] so tests can drive tick sequences deterministically.
pub struct ReminderScanner {
    store: Arc<dyn StudyStore>,
    dispatcher: ReminderDispatcher,
    clock: Arc<dyn Clock>,
}

impl ReminderScanner {
    pub fn new(
        store: Arc<dyn StudyStore>,
        dispatcher: ReminderDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
        }
    }

    /// Run one scan tick. Returns the number of reminders dispatched.
    ///
    /// A store failure fetching sessions fails the whole tick (there is
    /// nothing to iterate); per-session failures are contained below so one
    /// bad session cannot starve the rest of the batch.
    pub async fn tick(&self) -> Result<u32, StudyhiveError> {
        let now = self.clock.now();
        let sessions = self.store.upcoming_sessions(now).await?;
        debug!(count = sessions.len(), "scanning upcoming sessions");

        let mut dispatched = 0u32;
        for session in &sessions {
            let delta = session.scheduled_start - now;
            for lead in leads_for(delta) {
                match self.store.mark_reminder_sent(session.id, lead).await {
                    Ok(true) => {
                        self.dispatcher.dispatch(session, lead).await;
                        dispatched += 1;
                    }
                    Ok(false) => {
                        debug!(session_id = session.id, lead = %lead, "reminder already sent");
                    }
                    Err(e) => {
                        error!(session_id = session.id, lead = %lead, "reminder log write failed: {e}");
                    }
                }
            }
        }
        Ok(dispatched)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use studyhive_hub::events::ServerEvent;
    use studyhive_hub::rooms::{RoomId, Rooms};
    use studyhive_test_utils::{session_fixture, ManualClock, MockStore};

    use super::*;

    struct Fixture {
        store: Arc<MockStore>,
        rooms: Arc<Rooms>,
        clock: ManualClock,
        scanner: ReminderScanner,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MockStore::new());
            let rooms = Arc::new(Rooms::new());
            let clock = ManualClock::new(Utc::now());
            let dispatcher = ReminderDispatcher::new(
                Arc::clone(&store) as Arc<dyn StudyStore>,
                Arc::clone(&rooms),
                None,
            );
            let scanner = ReminderScanner::new(
                Arc::clone(&store) as Arc<dyn StudyStore>,
                dispatcher,
                Arc::new(clock.clone()),
            );
            Self {
                store,
                rooms,
                clock,
                scanner,
            }
        }
    }

    #[tokio::test]
    async fn fifteen_minute_reminder_fires_exactly_once_over_lifetime() {
        let fx = Fixture::new();
        let start = fx.clock.now() + Duration::minutes(15);
        fx.store
            .add_session(session_fixture(1, 42, "Calculus", start))
            .await;

        // Simulate one-minute ticks until past the session start.
        let mut total = 0;
        for _ in 0..=16 {
            total += fx.scanner.tick().await.unwrap();
            fx.clock.advance(Duration::minutes(1));
        }

        assert_eq!(total, 1);
        let notifications = fx.store.notifications().await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "\"Calculus\" starts in 15 minutes");
    }

    #[tokio::test]
    async fn session_sixty_one_minutes_out_does_not_fire_now() {
        let fx = Fixture::new();
        fx.store
            .add_session(session_fixture(
                1,
                42,
                "Chemistry",
                fx.clock.now() + Duration::minutes(61),
            ))
            .await;

        assert_eq!(fx.scanner.tick().await.unwrap(), 0);
        assert!(fx.store.notifications().await.is_empty());

        // One minute later the 1-hour window is reached.
        fx.clock.advance(Duration::minutes(1));
        assert_eq!(fx.scanner.tick().await.unwrap(), 1);
        let notifications = fx.store.notifications().await;
        assert_eq!(notifications[0].message, "\"Chemistry\" starts in 1 hour");
    }

    #[tokio::test]
    async fn all_three_leads_fire_over_a_day() {
        let fx = Fixture::new();
        let start = fx.clock.now() + Duration::minutes(1440);
        fx.store
            .add_session(session_fixture(1, 42, "Thesis", start))
            .await;

        let mut total = 0;
        for _ in 0..=1441 {
            total += fx.scanner.tick().await.unwrap();
            fx.clock.advance(Duration::minutes(1));
        }

        assert_eq!(total, 3);
        let messages: Vec<String> = fx
            .store
            .notifications()
            .await
            .iter()
            .map(|n| n.message.clone())
            .collect();
        assert_eq!(
            messages,
            vec![
                "\"Thesis\" starts in 1 day",
                "\"Thesis\" starts in 1 hour",
                "\"Thesis\" starts in 15 minutes",
            ]
        );
    }

    #[tokio::test]
    async fn sub_minute_cadence_does_not_double_fire() {
        let fx = Fixture::new();
        let start = fx.clock.now() + Duration::minutes(15);
        fx.store
            .add_session(session_fixture(1, 42, "Calculus", start))
            .await;

        // Two ticks 30 seconds apart, both inside the (14m, 15m] window:
        // the reminder log keeps the invariant exact.
        assert_eq!(fx.scanner.tick().await.unwrap(), 1);
        fx.clock.advance(Duration::seconds(30));
        assert_eq!(fx.scanner.tick().await.unwrap(), 0);
        assert_eq!(fx.store.notifications().await.len(), 1);
    }

    #[tokio::test]
    async fn reminder_event_reaches_owner_room() {
        let fx = Fixture::new();
        let mut owner_room = fx.rooms.subscribe(RoomId::User(42));
        fx.store
            .add_session(session_fixture(
                7,
                42,
                "Calculus",
                fx.clock.now() + Duration::minutes(15),
            ))
            .await;

        fx.scanner.tick().await.unwrap();

        assert!(matches!(
            owner_room.recv().await.unwrap(),
            ServerEvent::Reminder { session_id: 7, .. }
        ));
    }

    #[tokio::test]
    async fn store_failure_fails_the_tick_and_next_tick_recovers() {
        let fx = Fixture::new();
        fx.store
            .add_session(session_fixture(
                1,
                42,
                "Calculus",
                fx.clock.now() + Duration::minutes(15),
            ))
            .await;

        fx.store.fail_sessions(true);
        assert!(fx.scanner.tick().await.is_err());
        assert!(fx.store.notifications().await.is_empty());

        // The next natural tick proceeds independently.
        fx.store.fail_sessions(false);
        assert_eq!(fx.scanner.tick().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn multiple_sessions_fire_in_the_same_tick() {
        let fx = Fixture::new();
        let now = fx.clock.now();
        fx.store
            .add_session(session_fixture(1, 42, "Calculus", now + Duration::minutes(15)))
            .await;
        fx.store
            .add_session(session_fixture(2, 7, "Biology", now + Duration::minutes(60)))
            .await;
        fx.store
            .add_session(session_fixture(3, 9, "History", now + Duration::minutes(90)))
            .await;

        assert_eq!(fx.scanner.tick().await.unwrap(), 2);
    }
}
