//! Route handlers.

pub mod research;
pub mod sessions;
pub mod slots;

use alpha_core::TerminalError;
use axum::http::StatusCode;

/// Handler error: a status and a plain-text reason.
pub type ApiError = (StatusCode, String);

pub(crate) fn session_not_found(id: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("Session not found: {}", id))
}

pub(crate) fn login_required() -> ApiError {
    (StatusCode::UNAUTHORIZED, "Login required".to_string())
}

/// Map a session-layer error onto an HTTP status.
pub(crate) fn terminal_error(err: TerminalError) -> ApiError {
    let status = match &err {
        TerminalError::InvalidTransition { .. } => StatusCode::CONFLICT,
        TerminalError::Unauthorized(_) => StatusCode::FORBIDDEN,
        TerminalError::ValidationError(_) => StatusCode::BAD_REQUEST,
        TerminalError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// Reject blank free-text inputs before they reach the desk.
pub(crate) fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, format!("{} is required", field)));
    }
    Ok(())
}
