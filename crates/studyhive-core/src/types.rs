// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Studyhive workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state of a study session.
///
/// Transitions are owned by the scheduling API, not by this core; the
/// reminder scanner only ever reads sessions in the `Scheduled` state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

/// A planned study session belonging to one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    /// Database primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Human-readable session title.
    pub title: String,
    /// Optional subject tag ("Linear Algebra", "Organic Chemistry", ...).
    pub subject: Option<String>,
    /// Scheduled start time, UTC.
    pub scheduled_start: DateTime<Utc>,
    /// Planned duration in minutes.
    pub duration_minutes: i64,
    /// Lifecycle state.
    pub status: SessionStatus,
}

/// Kind tag attached to every notification row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SessionReminder,
    FriendActivity,
    System,
}

/// A persisted user notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Database primary key.
    pub id: i64,
    /// Target user.
    pub user_id: i64,
    /// Kind tag.
    pub kind: NotificationKind,
    /// Short title shown in the notification list.
    pub title: String,
    /// Free-text body.
    pub message: String,
    /// Optional related entity id (e.g. the session a reminder points at).
    pub related_id: Option<i64>,
    /// Optional related entity type ("study_session", ...).
    pub related_kind: Option<String>,
    /// Read/unread flag.
    pub is_read: bool,
    /// Creation timestamp, UTC.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a notification; id and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_id: Option<i64>,
    pub related_kind: Option<String>,
}

/// A persisted direct chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    /// Content type tag ("text", "image", "file"). Free-form: the hub relays
    /// it without interpretation.
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for persisting a direct chat message.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub content_type: String,
}

/// A persisted group chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMessage {
    pub id: i64,
    pub group_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for persisting a group chat message.
#[derive(Debug, Clone)]
pub struct NewGroupMessage {
    pub group_id: i64,
    pub sender_id: i64,
    pub content: String,
}

/// A friend of a user, as returned by the studying-friends lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub user_id: i64,
    pub username: String,
}

/// Lead-time bucket for a session reminder.
///
/// The string form ("15m", "1h", "1d") is the stable key used in the
/// reminder log; [`ReminderLead::label`] is the human-readable form that
/// appears in notification text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ReminderLead {
    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
}

impl ReminderLead {
    /// Human-readable label interpolated into notification messages.
    pub fn label(&self) -> &'static str {
        match self {
            ReminderLead::FifteenMinutes => "15 minutes",
            ReminderLead::OneHour => "1 hour",
            ReminderLead::OneDay => "1 day",
        }
    }

    /// Nominal lead time in minutes before session start.
    pub fn minutes(&self) -> i64 {
        match self {
            ReminderLead::FifteenMinutes => 15,
            ReminderLead::OneHour => 60,
            ReminderLead::OneDay => 1440,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_status_string_round_trip() {
        use std::str::FromStr;

        for status in [
            SessionStatus::Scheduled,
            SessionStatus::Active,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
        ] {
            let s = status.to_string();
            assert_eq!(SessionStatus::from_str(&s).unwrap(), status);
        }
    }

    #[test]
    fn notification_kind_uses_snake_case() {
        assert_eq!(NotificationKind::SessionReminder.to_string(), "session_reminder");
        assert_eq!(NotificationKind::FriendActivity.to_string(), "friend_activity");
    }

    #[test]
    fn reminder_lead_labels() {
        assert_eq!(ReminderLead::FifteenMinutes.label(), "15 minutes");
        assert_eq!(ReminderLead::OneHour.label(), "1 hour");
        assert_eq!(ReminderLead::OneDay.label(), "1 day");
    }

    #[test]
    fn reminder_lead_minutes() {
        assert_eq!(ReminderLead::FifteenMinutes.minutes(), 15);
        assert_eq!(ReminderLead::OneHour.minutes(), 60);
        assert_eq!(ReminderLead::OneDay.minutes(), 1440);
    }

    #[test]
    fn reminder_lead_serde_uses_short_keys() {
        let json = serde_json::to_string(&ReminderLead::OneDay).unwrap();
        assert_eq!(json, r#""1d""#);
        let parsed: ReminderLead = serde_json::from_str(r#""15m""#).unwrap();
        assert_eq!(parsed, ReminderLead::FifteenMinutes);
    }

    #[test]
    fn notification_serializes_kind_as_snake_case() {
        let n = Notification {
            id: 1,
            user_id: 7,
            kind: NotificationKind::SessionReminder,
            title: "Study Session Reminder".to_string(),
            message: "starts in 15 minutes".to_string(),
            related_id: Some(3),
            related_kind: Some("study_session".to_string()),
            is_read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["kind"], "session_reminder");
        assert_eq!(json["related_kind"], "study_session");
    }
}
