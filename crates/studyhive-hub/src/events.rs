// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed WebSocket event surface, client -> server and server -> client.
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "join-user", "user_id": 42}
//! {"type": "send-message", "receiver_id": 7, "content": "study at 6?"}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"type": "new-message", "message": {...}}
//! {"type": "reminder", "title": "...", "message": "...", "session_id": 3}
//! ```
//!
//! Sender identity is never part of a client payload: it comes from the
//! connection's authenticated user id established at handshake.

use serde::{Deserialize, Serialize};

use studyhive_core::types::{ChatMessage, GroupMessage};

fn default_content_type() -> String {
    "text".to_string()
}

/// Events received from a connected client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Subscribe this connection to its own user room.
    JoinUser { user_id: i64 },
    /// Subscribe this connection to a group room (membership checked).
    JoinGroup { group_id: i64 },
    /// Persist a direct message and relay it to the receiver's room.
    SendMessage {
        receiver_id: i64,
        content: String,
        #[serde(default = "default_content_type")]
        content_type: String,
    },
    /// Persist a group message and relay it to the group room.
    SendGroupMessage { group_id: i64, content: String },
    /// Announce a started study session to studying friends.
    StartStudySession {
        session_id: i64,
        #[serde(default)]
        subject: Option<String>,
    },
    /// Relay a typing indicator to the receiver's room.
    Typing { receiver_id: i64 },
}

/// Events delivered to connected clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// A direct message, delivered to the receiver's room.
    NewMessage { message: ChatMessage },
    /// Delivery ack, sent to the sending connection only.
    MessageSent { message: ChatMessage },
    /// A group message, delivered to the whole group room.
    NewGroupMessage { message: GroupMessage },
    /// A friend began studying, delivered to each friend's user room.
    FriendStartedStudy {
        user_id: i64,
        session_id: i64,
        subject: Option<String>,
    },
    /// Typing indicator, delivered to the receiver's room only.
    UserTyping { sender_id: i64 },
    /// A session reminder, delivered to the session owner's room.
    Reminder {
        title: String,
        message: String,
        session_id: i64,
    },
    /// Join acknowledged.
    Joined { room: String },
    /// A client event was rejected or failed.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_deserialize_from_kebab_case_tags() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"type": "join-user", "user_id": 42}"#).unwrap();
        assert!(matches!(event, ClientEvent::JoinUser { user_id: 42 }));

        let event: ClientEvent = serde_json::from_str(
            r#"{"type": "send-message", "receiver_id": 7, "content": "hi"}"#,
        )
        .unwrap();
        match event {
            ClientEvent::SendMessage {
                receiver_id,
                content,
                content_type,
            } => {
                assert_eq!(receiver_id, 7);
                assert_eq!(content, "hi");
                assert_eq!(content_type, "text");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn start_study_session_subject_is_optional() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"type": "start-study-session", "session_id": 3}"#).unwrap();
        assert!(matches!(
            event,
            ClientEvent::StartStudySession {
                session_id: 3,
                subject: None
            }
        ));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"type": "drop-tables"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn server_events_serialize_with_kebab_case_tags() {
        let event = ServerEvent::Reminder {
            title: "Study Session Reminder".to_string(),
            message: "\"Calculus\" starts in 15 minutes".to_string(),
            session_id: 9,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "reminder");
        assert_eq!(json["session_id"], 9);

        let event = ServerEvent::UserTyping { sender_id: 4 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "user-typing");
        assert_eq!(json["sender_id"], 4);
    }
}
