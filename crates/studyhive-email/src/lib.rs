// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP reminder mailer.
//!
//! Implements the [`Mailer`] seam over lettre's async SMTP transport.
//! Delivery is best-effort by contract: errors are returned to the
//! dispatcher, which logs them and continues with the rest of the
//! dispatch pipeline.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use studyhive_core::types::{ReminderLead, StudySession};
use studyhive_core::{Mailer, StudyhiveError};

/// SMTP settings for the mailer.
///
/// Mirrors the `[email]` section of `studyhive-config` to avoid a
/// dependency on the config crate from this crate.
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP relay hostname.
    pub host: String,
    /// SMTP relay port.
    pub port: u16,
    /// Optional SMTP credentials.
    pub username: Option<String>,
    pub password: Option<String>,
    /// From address on outgoing reminders.
    pub from_address: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("from_address", &self.from_address)
            .finish()
    }
}

fn email_error(
    message: impl Into<String>,
    source: impl std::error::Error + Send + Sync + 'static,
) -> StudyhiveError {
    StudyhiveError::Email {
        message: message.into(),
        source: Some(Box::new(source)),
    }
}

/// Lettre-backed [`Mailer`] using STARTTLS SMTP.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from config. Fails fast on an unparsable relay
    /// host or from address; connection errors surface per send.
    pub fn new(config: &SmtpConfig) -> Result<Self, StudyhiveError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| email_error(format!("invalid SMTP relay {}", config.host), e))?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| email_error(format!("invalid from address {}", config.from_address), e))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Plain-text body for a reminder email.
fn reminder_body(session: &StudySession, lead: ReminderLead) -> String {
    format!(
        "Your study session \"{}\" starts in {}.\n\nScheduled for: {}\n",
        session.title,
        lead.label(),
        session.scheduled_start.format("%Y-%m-%d %H:%M UTC"),
    )
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_reminder(
        &self,
        to: &str,
        session: &StudySession,
        lead: ReminderLead,
    ) -> Result<(), StudyhiveError> {
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|e| email_error(format!("invalid recipient address {to}"), e))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject("Study Session Reminder")
            .header(ContentType::TEXT_PLAIN)
            .body(reminder_body(session, lead))
            .map_err(|e| email_error("failed to build reminder email", e))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| email_error("SMTP send failed", e))?;

        debug!(session_id = session.id, lead = %lead, "reminder email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use studyhive_core::types::SessionStatus;

    use super::*;

    fn session() -> StudySession {
        StudySession {
            id: 3,
            user_id: 1,
            title: "Linear Algebra".to_string(),
            subject: Some("math".to_string()),
            scheduled_start: Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap(),
            duration_minutes: 90,
            status: SessionStatus::Scheduled,
        }
    }

    #[test]
    fn body_interpolates_title_and_lead() {
        let body = reminder_body(&session(), ReminderLead::FifteenMinutes);
        assert!(body.contains("\"Linear Algebra\""));
        assert!(body.contains("starts in 15 minutes"));
        assert!(body.contains("2026-03-14 18:30 UTC"));
    }

    #[test]
    fn mailer_builds_without_credentials() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: None,
            password: None,
            from_address: "reminders@studyhive.local".to_string(),
        };
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[test]
    fn bad_from_address_is_rejected() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: None,
            password: None,
            from_address: "not an address".to_string(),
        };
        assert!(SmtpMailer::new(&config).is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: Some("mailer".to_string()),
            password: Some("hunter2".to_string()),
            from_address: "reminders@studyhive.local".to_string(),
        };
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("[redacted]"));
    }
}
