// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email collaborator for reminder delivery.

use async_trait::async_trait;

use crate::error::StudyhiveError;
use crate::types::{ReminderLead, StudySession};

/// Best-effort email delivery for session reminders.
///
/// Callers treat failures as non-fatal: the dispatcher logs and continues,
/// so implementations should return errors rather than retry internally.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a reminder email for `session` to `to` at the given lead time.
    async fn send_reminder(
        &self,
        to: &str,
        session: &StudySession,
        lead: ReminderLead,
    ) -> Result<(), StudyhiveError>;
}
