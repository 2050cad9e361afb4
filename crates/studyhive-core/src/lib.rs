// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Studyhive backend.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Studyhive workspace. The persistence,
//! real-time, and scheduling crates all depend on the seams defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StudyhiveError;
pub use types::{
    ChatMessage, Friend, GroupMessage, NewChatMessage, NewGroupMessage, NewNotification,
    Notification, NotificationKind, ReminderLead, SessionStatus, StudySession,
};

// Re-export the adapter traits at crate root.
pub use traits::{Clock, Mailer, StudyStore, SystemClock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studyhive_error_has_all_variants() {
        let _config = StudyhiveError::Config("test".into());
        let _storage = StudyhiveError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _hub = StudyhiveError::Hub {
            message: "test".into(),
            source: None,
        };
        let _email = StudyhiveError::Email {
            message: "test".into(),
            source: None,
        };
        let _timeout = StudyhiveError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = StudyhiveError::Internal("test".into());
    }

    #[test]
    fn reminder_lead_labels_round_trip() {
        use std::str::FromStr;

        for lead in [
            ReminderLead::FifteenMinutes,
            ReminderLead::OneHour,
            ReminderLead::OneDay,
        ] {
            let key = lead.to_string();
            let parsed = ReminderLead::from_str(&key).expect("should parse back");
            assert_eq!(lead, parsed);
        }
    }

    #[test]
    fn trait_objects_are_constructible() {
        // Verifies the trait seams stay object-safe. If a signature change
        // breaks object safety, this test won't compile.
        fn _assert_store(_: &dyn StudyStore) {}
        fn _assert_mailer(_: &dyn Mailer) {}
        fn _assert_clock(_: &dyn Clock) {}
    }
}
