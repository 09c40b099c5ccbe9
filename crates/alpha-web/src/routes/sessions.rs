//! Session lifecycle handlers.

use alpha_core::{Session, TerminalResult, UserProfile};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{session_not_found, terminal_error, ApiError};
use crate::state::{AppState, SessionEntry, WebSocketMessage};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub session: Session,
    pub is_admin: bool,
}

#[derive(Deserialize)]
pub struct AdminUnlockRequest {
    pub password: String,
}

fn respond(state: &AppState, id: &str, entry: &SessionEntry) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: id.to_string(),
        session: entry.session.clone(),
        is_admin: entry.session.is_admin(state.admin.as_ref()),
    })
}

/// Apply a transition to one session under the write lock.
async fn transition(
    state: &AppState,
    id: &str,
    apply: impl FnOnce(&mut SessionEntry) -> TerminalResult<()>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
    entry.touch();
    apply(entry).map_err(terminal_error)?;
    Ok(respond(state, id, entry))
}

pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let id = Uuid::new_v4().to_string();
    let entry = SessionEntry::new();
    let body = respond(&state, &id, &entry);

    state.sessions.write().await.insert(id.clone(), entry);
    info!(session_id = %id, "Session opened");
    state.broadcast(WebSocketMessage::SessionOpened { session_id: id });

    (StatusCode::CREATED, body)
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
    entry.touch();
    Ok(respond(&state, &id, entry))
}

pub async fn accept_risk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    transition(&state, &id, |entry| {
        entry.session.accept_risk();
        Ok(())
    })
    .await
}

pub async fn login(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<SessionResponse>, ApiError> {
    transition(&state, &id, |entry| entry.session.login(profile)).await
}

pub async fn unlock_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AdminUnlockRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let admin = state.admin.clone();
    transition(&state, &id, |entry| {
        entry.session.unlock_admin(&req.password, admin.as_ref())
    })
    .await
}

/// Log out. The session keeps its risk acceptance; committed results are
/// dropped and in-flight requests for it will not commit.
pub async fn logout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let response = transition(&state, &id, |entry| {
        entry.session.logout();
        entry.slots.clear();
        Ok(())
    })
    .await?;

    info!(session_id = %id, "Session logged out");
    state.broadcast(WebSocketMessage::SessionClosed { session_id: id });
    Ok(response)
}
