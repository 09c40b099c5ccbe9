//! Latest-result reads.

use alpha_core::Slot;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::research::ResearchResponse;
use super::{login_required, session_not_found, ApiError};
use crate::state::AppState;

pub async fn latest_result(
    State(state): State<AppState>,
    Path((id, slot)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let slot = Slot::parse(&slot)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown slot: {}", slot)))?;

    let mut sessions = state.sessions.write().await;
    let entry = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
    entry.touch();
    if !entry.session.authenticated {
        return Err(login_required());
    }

    let (Some(result), Some(generation)) =
        (entry.slots.latest(slot), entry.slots.latest_generation(slot))
    else {
        return Err((
            StatusCode::NOT_FOUND,
            format!("No result yet for slot: {}", slot.as_str()),
        ));
    };

    Ok(Json(ResearchResponse {
        slot,
        generation,
        accepted: true,
        result: result.view(),
    })
    .into_response())
}
