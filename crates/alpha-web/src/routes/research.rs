//! Research handlers.
//!
//! Each handler takes a ticket for its slot, runs one research call with no
//! lock held, then commits through the session's slot board. A failed call is
//! still a 200 carrying the fallback output.

use alpha_core::research::{short_term_query, BottomUpMode, BulletinKind, ResearchView};
use alpha_core::{ResearchResult, Slot};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

use super::{login_required, required, session_not_found, ApiError};
use crate::state::{AppState, WebSocketMessage};

/// A research result together with the ticket it was issued under.
#[derive(Debug, Serialize)]
pub struct ResearchResponse<'a> {
    pub slot: Slot,
    pub generation: u64,
    /// False when a newer request for the same slot superseded this one.
    pub accepted: bool,
    #[serde(flatten)]
    pub result: ResearchView<'a>,
}

#[derive(Deserialize)]
pub struct CompanyRequest {
    pub company: String,
}

#[derive(Deserialize)]
pub struct BottomUpRequest {
    pub query: String,
    #[serde(default)]
    pub mode: BottomUpMode,
}

#[derive(Deserialize, Default)]
pub struct ShortTermRequest {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct BulletinRequest {
    pub kind: BulletinKind,
}

async fn run_in_slot(
    state: &AppState,
    id: &str,
    slot: Slot,
    research: impl Future<Output = ResearchResult>,
) -> Result<Response, ApiError> {
    let ticket = {
        let mut sessions = state.sessions.write().await;
        let entry = sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
        entry.touch();
        if !entry.session.authenticated {
            return Err(login_required());
        }
        entry.slots.begin(slot)
    };

    let result = research.await;

    let accepted = match state.sessions.write().await.get_mut(id) {
        Some(entry) => entry.slots.commit(ticket, result.clone()),
        None => false,
    };
    debug!(
        session_id = %id,
        slot = slot.as_str(),
        generation = ticket.generation,
        accepted,
        "Research committed"
    );

    state.broadcast(WebSocketMessage::ResearchCompleted {
        session_id: id.to_string(),
        slot,
        generation: ticket.generation,
        accepted,
    });

    Ok(Json(ResearchResponse {
        slot,
        generation: ticket.generation,
        accepted,
        result: result.view(),
    })
    .into_response())
}

pub async fn morning_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    run_in_slot(&state, &id, Slot::Brief, state.desk.morning_brief()).await
}

pub async fn ipo_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    run_in_slot(&state, &id, Slot::IpoScan, state.desk.scan_ipos()).await
}

pub async fn ipo_deep_dive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CompanyRequest>,
) -> Result<Response, ApiError> {
    required("company", &req.company)?;
    run_in_slot(
        &state,
        &id,
        Slot::IpoProspectus,
        state.desk.ipo_deep_dive(req.company.trim()),
    )
    .await
}

pub async fn top_down(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    run_in_slot(&state, &id, Slot::TopDown, state.desk.top_down()).await
}

pub async fn company_deep_dive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CompanyRequest>,
) -> Result<Response, ApiError> {
    required("company", &req.company)?;
    run_in_slot(
        &state,
        &id,
        Slot::Audit,
        state.desk.company_deep_dive(req.company.trim()),
    )
    .await
}

pub async fn bottom_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BottomUpRequest>,
) -> Result<Response, ApiError> {
    required("query", &req.query)?;
    run_in_slot(
        &state,
        &id,
        Slot::BottomUp,
        state.desk.bottom_up(req.query.trim(), req.mode),
    )
    .await
}

/// Company deep dive on the search text, or on a ticker picked from this
/// session's morning brief.
pub async fn short_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ShortTermRequest>,
) -> Result<Response, ApiError> {
    let brief_text = state
        .sessions
        .read()
        .await
        .get(&id)
        .and_then(|entry| entry.slots.latest(Slot::Brief))
        .filter(|result| result.is_success())
        .map(|result| result.output().text.clone());

    let query = short_term_query(req.search.as_deref(), brief_text.as_deref());
    run_in_slot(&state, &id, Slot::Audit, state.desk.company_deep_dive(&query)).await
}

pub async fn bulletin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BulletinRequest>,
) -> Result<Response, ApiError> {
    run_in_slot(&state, &id, Slot::Bulletin, state.desk.bulletin(req.kind)).await
}
