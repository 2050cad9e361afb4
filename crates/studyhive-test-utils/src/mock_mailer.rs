// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock mailer that captures sends for assertion.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use studyhive_core::types::{ReminderLead, StudySession};
use studyhive_core::{Mailer, StudyhiveError};

/// A [`Mailer`] double: captures every send, optionally failing them all.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<(String, i64, ReminderLead)>>,
    fail: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// (recipient, session id, lead) triples captured so far.
    pub async fn sent(&self) -> Vec<(String, i64, ReminderLead)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_reminder(
        &self,
        to: &str,
        session: &StudySession,
        lead: ReminderLead,
    ) -> Result<(), StudyhiveError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StudyhiveError::Email {
                message: "mock mailer failure".to_string(),
                source: None,
            });
        }
        self.sent
            .lock()
            .await
            .push((to.to_string(), session.id, lead));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::mock_store::session_fixture;

    use super::*;

    #[tokio::test]
    async fn captures_sends_in_order() {
        let mailer = MockMailer::new();
        let session = session_fixture(9, 1, "review", Utc::now());

        mailer
            .send_reminder("a@example.com", &session, ReminderLead::OneHour)
            .await
            .unwrap();
        mailer
            .send_reminder("a@example.com", &session, ReminderLead::FifteenMinutes)
            .await
            .unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], ("a@example.com".to_string(), 9, ReminderLead::OneHour));
        assert_eq!(sent[1].2, ReminderLead::FifteenMinutes);
    }

    #[tokio::test]
    async fn toggled_failure_surfaces_as_email_error() {
        let mailer = MockMailer::new();
        mailer.fail_sends(true);
        let session = session_fixture(9, 1, "review", Utc::now());

        let err = mailer
            .send_reminder("a@example.com", &session, ReminderLead::OneDay)
            .await
            .unwrap_err();
        assert!(matches!(err, StudyhiveError::Email { .. }));
    }
}
