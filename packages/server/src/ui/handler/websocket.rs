//! WebSocket connection handlers.
//!
//! Each connection walks a two-phase lifecycle. It starts unvalidated: the
//! only event that does anything is `join`, everything else is dropped, and
//! a deadline closes connections that never claim an identity. A successful
//! join flips it to validated, where the full event set applies until the
//! socket goes away and teardown releases whatever the connection held.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use banter_shared::time::{format_clock_time, now_millis};

use crate::{
    domain::{ConnectionId, Identity, PusherChannel},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let conn_id = ConnectionId::generate();
    tracing::info!("Connection {} accepted, awaiting join", conn_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, conn_id))
}

/// Spawns the outbound half of a connection: everything queued on the
/// channel is written to the socket in order, one task per connection, so
/// no fan-out ever blocks on a slow peer.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Sends an event to this connection only, via its own outbound queue.
///
/// A send error means the connection is already tearing down, in which case
/// the event is moot anyway.
fn send_direct(tx: &PusherChannel, event: &ServerEvent) {
    let _ = tx.send(event.to_json());
}

enum JoinOutcome {
    Joined(Identity),
    DeadlineExpired,
    Disconnected,
}

/// Drives the unvalidated phase.
///
/// Loops over inbound frames until a join succeeds or the deadline fires.
/// Failed join attempts are answered with a rejection and the connection may
/// retry; the deadline is fixed at connect time, so retries do not extend it.
async fn await_join(
    receiver: &mut SplitStream<WebSocket>,
    state: &Arc<AppState>,
    conn_id: ConnectionId,
    tx: &PusherChannel,
) -> JoinOutcome {
    let deadline = tokio::time::Instant::now() + state.join_deadline;

    loop {
        let msg = match tokio::time::timeout_at(deadline, receiver.next()).await {
            Err(_) => return JoinOutcome::DeadlineExpired,
            Ok(None) => return JoinOutcome::Disconnected,
            Ok(Some(Err(e))) => {
                tracing::warn!("WebSocket error on {} before join: {}", conn_id, e);
                return JoinOutcome::Disconnected;
            }
            Ok(Some(Ok(msg))) => msg,
        };

        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => return JoinOutcome::Disconnected,
            _ => continue,
        };

        match serde_json::from_str::<ClientEvent>(&text) {
            Ok(ClientEvent::Join { display_name }) => {
                match state
                    .join_room_usecase
                    .execute(conn_id, &display_name, tx.clone())
                    .await
                {
                    Ok(identity) => return JoinOutcome::Joined(identity),
                    Err(e) => {
                        tracing::info!("Join refused for {}: {}", conn_id, e);
                        send_direct(
                            tx,
                            &ServerEvent::Rejected {
                                reason: e.to_string(),
                            },
                        );
                    }
                }
            }
            // everything else is meaningless without an identity
            Ok(_) => {
                tracing::debug!("Dropping pre-join event from {}", conn_id);
            }
            Err(e) => {
                tracing::debug!("Unparseable frame from {}: {}", conn_id, e);
                send_direct(
                    tx,
                    &ServerEvent::Rejected {
                        reason: "unrecognized event".to_string(),
                    },
                );
            }
        }
    }
}

/// Drives the validated phase until the socket closes or errors.
async fn validated_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    conn_id: ConnectionId,
    tx: PusherChannel,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on {}: {}", conn_id, e);
                break;
            }
        };

        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => {
                tracing::info!("Connection {} requested close", conn_id);
                break;
            }
            // ping/pong is answered by the protocol layer
            _ => continue,
        };

        let event = match serde_json::from_str::<ClientEvent>(&text) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!("Unparseable frame from {}: {}", conn_id, e);
                send_direct(
                    &tx,
                    &ServerEvent::Rejected {
                        reason: "unrecognized event".to_string(),
                    },
                );
                continue;
            }
        };

        match event {
            ClientEvent::Join { .. } => {
                send_direct(
                    &tx,
                    &ServerEvent::Rejected {
                        reason: "you have already joined the room".to_string(),
                    },
                );
            }
            ClientEvent::Message { text, file } => {
                match state
                    .send_message_usecase
                    .execute(conn_id, text, file.map(Into::into))
                    .await
                {
                    Ok(outbound) => {
                        let event = ServerEvent::from(outbound);
                        if let Err(e) = state
                            .send_message_usecase
                            .broadcast_to_all(&event.to_json())
                            .await
                        {
                            tracing::warn!("Failed to broadcast chat message: {}", e);
                        }
                    }
                    Err(e) => {
                        send_direct(
                            &tx,
                            &ServerEvent::Rejected {
                                reason: e.to_string(),
                            },
                        );
                    }
                }
            }
            ClientEvent::Typing => match state.typing_usecase.started(&conn_id).await {
                Ok(display_name) => {
                    let event = ServerEvent::UserTyping { display_name };
                    if let Err(e) = state
                        .typing_usecase
                        .broadcast_to_others(&conn_id, &event.to_json())
                        .await
                    {
                        tracing::warn!("Failed to broadcast typing indicator: {}", e);
                    }
                }
                Err(e) => send_direct(
                    &tx,
                    &ServerEvent::Rejected {
                        reason: e.to_string(),
                    },
                ),
            },
            ClientEvent::StopTyping => match state.typing_usecase.stopped(&conn_id).await {
                Ok(()) => {
                    let event = ServerEvent::UserStoppedTyping;
                    if let Err(e) = state
                        .typing_usecase
                        .broadcast_to_others(&conn_id, &event.to_json())
                        .await
                    {
                        tracing::warn!("Failed to broadcast typing indicator: {}", e);
                    }
                }
                Err(e) => send_direct(
                    &tx,
                    &ServerEvent::Rejected {
                        reason: e.to_string(),
                    },
                ),
            },
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, conn_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    let identity = match await_join(&mut receiver, &state, conn_id, &tx).await {
        JoinOutcome::Joined(identity) => identity,
        JoinOutcome::DeadlineExpired => {
            tracing::info!("Connection {} missed the join deadline, closing", conn_id);
            send_task.abort();
            teardown(&state, conn_id).await;
            return;
        }
        JoinOutcome::Disconnected => {
            tracing::info!("Connection {} closed before joining", conn_id);
            send_task.abort();
            teardown(&state, conn_id).await;
            return;
        }
    };

    let display_name = identity.name.as_str().to_string();
    tracing::info!("Connection {} validated as '{}'", conn_id, display_name);

    // the identity is registered already, so the announcement and the roster
    // both include the new member (register-then-announce)
    let joined = ServerEvent::Joined {
        message: format!("{} joined the chat", display_name),
        timestamp: format_clock_time(now_millis()),
    };
    if let Err(e) = state
        .join_room_usecase
        .broadcast_to_others(&conn_id, &joined.to_json())
        .await
    {
        tracing::warn!("Failed to broadcast join of '{}': {}", display_name, e);
    }
    let roster = ServerEvent::RosterUpdate {
        users: state.join_room_usecase.roster().await,
    };
    if let Err(e) = state
        .join_room_usecase
        .broadcast_to_all(&roster.to_json())
        .await
    {
        tracing::warn!("Failed to broadcast roster: {}", e);
    }

    let state_clone = state.clone();
    let tx_clone = tx.clone();
    let mut recv_task =
        tokio::spawn(async move { validated_loop(receiver, state_clone, conn_id, tx_clone).await });

    // if either half of the connection finishes, the other is done for too
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    teardown(&state, conn_id).await;
}

/// Releases the connection's state and announces the departure if the
/// connection had a validated identity. Safe to call for connections that
/// never joined.
async fn teardown(state: &Arc<AppState>, conn_id: ConnectionId) {
    let Some(identity) = state.leave_room_usecase.execute(conn_id).await else {
        return;
    };

    let display_name = identity.name.into_string();
    tracing::info!("Connection {} ('{}') left", conn_id, display_name);

    let left = ServerEvent::Left {
        message: format!("{} left the chat", display_name),
        timestamp: format_clock_time(now_millis()),
    };
    if let Err(e) = state
        .leave_room_usecase
        .broadcast_to_all(&left.to_json())
        .await
    {
        tracing::warn!("Failed to broadcast departure of '{}': {}", display_name, e);
    }
    let roster = ServerEvent::RosterUpdate {
        users: state.leave_room_usecase.roster().await,
    };
    if let Err(e) = state
        .leave_room_usecase
        .broadcast_to_all(&roster.to_json())
        .await
    {
        tracing::warn!("Failed to broadcast roster: {}", e);
    }
}
