//! WebSocket and HTTP connection handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;

use super::frame::Inbound;
use super::session::Session;
use super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Create a channel for this session to receive relayed frames
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::new(tx);
    let session_id = session.id();

    tracing::info!("Session '{}' connected", session_id);

    // Writer task: drain the session's queue into the socket. Fan-out from
    // other sessions only enqueues here, so a slow client backs up its own
    // queue without stalling anyone else's broadcast.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Read loop: each inbound frame is decoded once at the boundary and
    // handled to completion before the next is read.
    while let Some(msg) = ws_receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!("WebSocket error on session '{}': {}", session_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                session
                    .handle_frame(&state.registry, Inbound::decode(&text))
                    .await;
            }
            Message::Close(_) => {
                tracing::info!("Session '{}' requested close", session_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol;
            // binary messages are not part of the relay protocol.
            _ => {}
        }
    }

    send_task.abort();
    session.disconnect(&state.registry).await;
    tracing::info!("Session '{}' disconnected", session_id);
}

/// Summary of one room for the room list endpoint
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub members: usize,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the list of active rooms with their member counts
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let summaries = state
        .registry
        .room_summaries()
        .await
        .into_iter()
        .map(|(id, members)| RoomSummaryDto { id, members })
        .collect();

    Json(summaries)
}
