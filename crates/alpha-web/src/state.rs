//! Application state.

use alpha_core::{AdminCredentials, ResearchDesk, Session, Slot, SlotBoard};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::info;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_SESSION_IDLE_HOURS: i64 = 12;

/// WebSocket message types.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    SessionOpened {
        session_id: String,
    },
    SessionClosed {
        session_id: String,
    },
    ResearchCompleted {
        session_id: String,
        slot: Slot,
        generation: u64,
        accepted: bool,
    },
}

impl WebSocketMessage {
    pub fn session_id(&self) -> &str {
        match self {
            Self::SessionOpened { session_id }
            | Self::SessionClosed { session_id }
            | Self::ResearchCompleted { session_id, .. } => session_id,
        }
    }
}

/// One browser session and the results committed for it.
#[derive(Debug)]
pub struct SessionEntry {
    pub session: Session,
    pub slots: SlotBoard,
    pub last_seen: DateTime<Utc>,
}

impl SessionEntry {
    pub fn new() -> Self {
        Self {
            session: Session::default(),
            slots: SlotBoard::default(),
            last_seen: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

impl Default for SessionEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub desk: ResearchDesk,
    pub admin: Option<AdminCredentials>,
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    pub session_idle: Duration,
    pub tx: broadcast::Sender<WebSocketMessage>,
}

impl AppState {
    pub fn new(desk: ResearchDesk, admin: Option<AdminCredentials>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            desk,
            admin,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_idle: Duration::hours(DEFAULT_SESSION_IDLE_HOURS),
            tx,
        }
    }

    pub fn with_session_idle(mut self, idle: Duration) -> Self {
        self.session_idle = idle;
        self
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }

    /// Drop every session idle since before `now - session_idle`.
    /// Returns the ids removed.
    pub async fn expire_idle_sessions(&self, now: DateTime<Utc>) -> Vec<String> {
        let cutoff = now - self.session_idle;
        let mut expired = Vec::new();
        self.sessions.write().await.retain(|id, entry| {
            let keep = entry.last_seen >= cutoff;
            if !keep {
                expired.push(id.clone());
            }
            keep
        });

        for id in &expired {
            info!(session_id = %id, "Session expired");
            self.broadcast(WebSocketMessage::SessionClosed {
                session_id: id.clone(),
            });
        }
        expired
    }
}
