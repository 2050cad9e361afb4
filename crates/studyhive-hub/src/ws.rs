// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler: handshake auth, per-connection event loop, and the
//! relay between client events and room broadcasts.
//!
//! Each connection runs three kinds of tasks:
//! 1. Sender task: forwards queued [`ServerEvent`]s to the socket
//! 2. Receiver loop: reads client events and handles them in arrival order
//! 3. One forwarder task per joined room, pumping broadcasts into the queue
//!
//! Events within one connection are handled strictly in arrival order; no
//! ordering is guaranteed across connections.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use studyhive_core::types::{NewChatMessage, NewGroupMessage};

use crate::events::{ClientEvent, ServerEvent};
use crate::rooms::RoomId;
use crate::server::HubState;

/// Handshake query parameters.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Shared bearer token.
    pub token: Option<String>,
    /// The user id this connection claims.
    pub user_id: Option<i64>,
}

/// Result of handling one client event.
///
/// Factored out of the socket loop so event semantics are testable without
/// a live connection: `Reply` goes to the sending connection only,
/// `Subscribe` hands the loop a new room receiver to pump.
pub enum Action {
    Reply(ServerEvent),
    Subscribe(RoomId, broadcast::Receiver<ServerEvent>),
}

/// WebSocket upgrade handler.
///
/// Authentication happens here, before the upgrade: a bad token or missing
/// user id never gets a socket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<HubState>,
) -> Response {
    match state
        .auth
        .authenticate(params.token.as_deref(), params.user_id)
    {
        Some(user_id) => ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)),
        None => {
            tracing::debug!("websocket handshake rejected");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// Handle an individual authenticated WebSocket connection.
async fn handle_socket(socket: WebSocket, state: HubState, user_id: i64) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::debug!(conn = %conn_id, user_id, "websocket connected");

    // Queue of events bound for this socket.
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(64);

    // Sender task: forward queued events to the socket.
    let sender_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("failed to encode server event: {e}");
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // One forwarder per joined room.
    let mut forwarders: Vec<JoinHandle<()>> = Vec::new();

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Text(text) => {
                let text_str: &str = &text;
                let event: ClientEvent = match serde_json::from_str(text_str) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(conn = %conn_id, "invalid client event: {e}");
                        let _ = tx
                            .send(ServerEvent::Error {
                                message: "unrecognized event".to_string(),
                            })
                            .await;
                        continue;
                    }
                };

                for action in handle_client_event(&state, user_id, event).await {
                    match action {
                        Action::Reply(event) => {
                            let _ = tx.send(event).await;
                        }
                        Action::Subscribe(room, receiver) => {
                            forwarders.push(spawn_forwarder(room, receiver, tx.clone()));
                        }
                    }
                }
            }
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping (handled by the transport layer)
        }
    }

    // Cleanup: dropping the receivers unsubscribes this connection.
    for task in &forwarders {
        task.abort();
    }
    sender_task.abort();
    tracing::debug!(conn = %conn_id, user_id, "websocket disconnected");
}

/// Pump one room's broadcasts into the connection's outbound queue.
fn spawn_forwarder(
    room: RoomId,
    mut receiver: broadcast::Receiver<ServerEvent>,
    tx: mpsc::Sender<ServerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(room = %room, missed, "slow consumer dropped room events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Handle one client event for the connection authenticated as `user_id`.
///
/// Persistence always happens before any room emission, so a store failure
/// suppresses delivery entirely.
pub async fn handle_client_event(
    state: &HubState,
    user_id: i64,
    event: ClientEvent,
) -> Vec<Action> {
    match event {
        ClientEvent::JoinUser { user_id: claimed } => {
            if claimed != user_id {
                tracing::warn!(user_id, claimed, "rejected join-user for foreign id");
                return vec![Action::Reply(ServerEvent::Error {
                    message: "join-user only allowed for your own id".to_string(),
                })];
            }
            let room = RoomId::User(user_id);
            let receiver = state.rooms.subscribe(room);
            vec![
                Action::Subscribe(room, receiver),
                Action::Reply(ServerEvent::Joined {
                    room: room.to_string(),
                }),
            ]
        }

        ClientEvent::JoinGroup { group_id } => {
            match state.store.is_group_member(group_id, user_id).await {
                Ok(true) => {
                    let room = RoomId::Group(group_id);
                    let receiver = state.rooms.subscribe(room);
                    vec![
                        Action::Subscribe(room, receiver),
                        Action::Reply(ServerEvent::Joined {
                            room: room.to_string(),
                        }),
                    ]
                }
                Ok(false) => {
                    tracing::warn!(user_id, group_id, "rejected join-group for non-member");
                    vec![Action::Reply(ServerEvent::Error {
                        message: "not a member of this group".to_string(),
                    })]
                }
                Err(e) => {
                    tracing::error!(user_id, group_id, "membership lookup failed: {e}");
                    vec![Action::Reply(ServerEvent::Error {
                        message: "join-group failed".to_string(),
                    })]
                }
            }
        }

        ClientEvent::SendMessage {
            receiver_id,
            content,
            content_type,
        } => {
            let new = NewChatMessage {
                sender_id: user_id,
                receiver_id,
                content,
                content_type,
            };
            match state.store.save_message(new).await {
                Ok(message) => {
                    state.rooms.publish(
                        RoomId::User(receiver_id),
                        ServerEvent::NewMessage {
                            message: message.clone(),
                        },
                    );
                    vec![Action::Reply(ServerEvent::MessageSent { message })]
                }
                Err(e) => {
                    tracing::error!(user_id, receiver_id, "failed to save message: {e}");
                    vec![Action::Reply(ServerEvent::Error {
                        message: "message not delivered".to_string(),
                    })]
                }
            }
        }

        ClientEvent::SendGroupMessage { group_id, content } => {
            let new = NewGroupMessage {
                group_id,
                sender_id: user_id,
                content,
            };
            match state.store.save_group_message(new).await {
                Ok(message) => {
                    // The sender receives this too, being a room member.
                    state
                        .rooms
                        .publish(RoomId::Group(group_id), ServerEvent::NewGroupMessage { message });
                    vec![]
                }
                Err(e) => {
                    tracing::error!(user_id, group_id, "failed to save group message: {e}");
                    vec![Action::Reply(ServerEvent::Error {
                        message: "message not delivered".to_string(),
                    })]
                }
            }
        }

        ClientEvent::StartStudySession {
            session_id,
            subject,
        } => match state.store.studying_friends(user_id).await {
            Ok(friends) => {
                for friend in friends {
                    state.rooms.publish(
                        RoomId::User(friend.user_id),
                        ServerEvent::FriendStartedStudy {
                            user_id,
                            session_id,
                            subject: subject.clone(),
                        },
                    );
                }
                vec![]
            }
            Err(e) => {
                tracing::error!(user_id, session_id, "studying-friends lookup failed: {e}");
                vec![Action::Reply(ServerEvent::Error {
                    message: "could not notify friends".to_string(),
                })]
            }
        },

        ClientEvent::Typing { receiver_id } => {
            // Relayed to the receiver only; never echoed back.
            state.rooms.publish(
                RoomId::User(receiver_id),
                ServerEvent::UserTyping { sender_id: user_id },
            );
            vec![]
        }
    }
}
