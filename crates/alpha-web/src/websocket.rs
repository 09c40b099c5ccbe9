//! Per-session WebSocket feed.
//!
//! A client connects to `/ws?session=<id>` and receives only the events for
//! that session.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{debug, info, warn};

use crate::routes::session_not_found;
use crate::state::{AppState, WebSocketMessage};

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub session: String,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Response {
    if !state.sessions.read().await.contains_key(&params.session) {
        return session_not_found(&params.session).into_response();
    }
    let rx = state.tx.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx, params.session))
}

/// Next event addressed to `session_id`, or `None` once the channel closes.
pub async fn next_for_session(
    rx: &mut Receiver<WebSocketMessage>,
    session_id: &str,
) -> Option<WebSocketMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) if msg.session_id() == session_id => return Some(msg),
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                warn!(session_id, skipped, "WebSocket feed lagging, events dropped");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

async fn handle_socket(socket: WebSocket, mut rx: Receiver<WebSocketMessage>, session_id: String) {
    let (mut sink, mut stream) = socket.split();
    info!(session_id = %session_id, "WebSocket feed opened");

    loop {
        tokio::select! {
            event = next_for_session(&mut rx, &session_id) => {
                let Some(event) = event else { break };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(error = %e, "Failed to encode WebSocket event");
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!(session_id = %session_id, "WebSocket feed closed");
}
