// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Room registry: an explicit map from room id to broadcast channel.
//!
//! A room exists while at least one connection is subscribed (plus a grace
//! entry until the next publish notices the last receiver is gone). State
//! is process-local and rebuilt from join events on reconnect.

use std::fmt;

use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::events::ServerEvent;

/// Per-room broadcast capacity. A slow consumer that falls more than this
/// many events behind starts losing the oldest ones.
const ROOM_CAPACITY: usize = 100;

/// Addressable broadcast channel identity: one per user, one per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomId {
    User(i64),
    Group(i64),
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomId::User(id) => write!(f, "user-{id}"),
            RoomId::Group(id) => write!(f, "group-{id}"),
        }
    }
}

/// Registry of live rooms.
pub struct Rooms {
    channels: DashMap<RoomId, broadcast::Sender<ServerEvent>>,
}

impl Rooms {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to a room, creating it if absent.
    pub fn subscribe(&self, room: RoomId) -> broadcast::Receiver<ServerEvent> {
        self.channels
            .entry(room)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Publish an event to a room. Returns the number of connections that
    /// received it; zero when the room has no subscribers.
    pub fn publish(&self, room: RoomId, event: ServerEvent) -> usize {
        let delivered = match self.channels.get(&room) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        };
        if delivered == 0 {
            // Last receiver is gone; drop the channel so the map does not
            // accumulate rooms for every user ever notified.
            self.channels
                .remove_if(&room, |_, sender| sender.receiver_count() == 0);
        }
        delivered
    }

    /// Number of live subscribers in a room.
    pub fn subscriber_count(&self, room: RoomId) -> usize {
        self.channels
            .get(&room)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for Rooms {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(session_id: i64) -> ServerEvent {
        ServerEvent::Reminder {
            title: "Study Session Reminder".to_string(),
            message: "soon".to_string(),
            session_id,
        }
    }

    #[test]
    fn room_id_display_matches_wire_format() {
        assert_eq!(RoomId::User(42).to_string(), "user-42");
        assert_eq!(RoomId::Group(7).to_string(), "group-7");
    }

    #[tokio::test]
    async fn publish_reaches_only_subscribed_room() {
        let rooms = Rooms::new();
        let mut in_room = rooms.subscribe(RoomId::User(42));
        let mut other_room = rooms.subscribe(RoomId::User(99));

        let delivered = rooms.publish(RoomId::User(42), reminder(1));
        assert_eq!(delivered, 1);

        let received = in_room.recv().await.unwrap();
        assert!(matches!(received, ServerEvent::Reminder { session_id: 1, .. }));
        assert!(other_room.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let rooms = Rooms::new();
        let mut a = rooms.subscribe(RoomId::Group(3));
        let mut b = rooms.subscribe(RoomId::Group(3));

        let delivered = rooms.publish(RoomId::Group(3), reminder(2));
        assert_eq!(delivered, 2);
        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[tokio::test]
    async fn publish_to_empty_room_is_a_noop() {
        let rooms = Rooms::new();
        assert_eq!(rooms.publish(RoomId::User(1), reminder(3)), 0);
        assert_eq!(rooms.subscriber_count(RoomId::User(1)), 0);
    }

    #[tokio::test]
    async fn dropped_receiver_prunes_room_on_next_publish() {
        let rooms = Rooms::new();
        let receiver = rooms.subscribe(RoomId::User(5));
        assert_eq!(rooms.subscriber_count(RoomId::User(5)), 1);

        drop(receiver);
        rooms.publish(RoomId::User(5), reminder(4));
        assert_eq!(rooms.subscriber_count(RoomId::User(5)), 0);
    }
}
