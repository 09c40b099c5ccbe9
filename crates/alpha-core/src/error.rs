//! Centralized error types for Alpha Terminal.

use thiserror::Error;

/// Main error type for terminal operations outside the research path.
///
/// Research operations never fail with this type; they fold every failure
/// into a [`crate::research::ResearchResult`].
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Invalid session transition: cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Gateway error: {0}")]
    Gateway(#[from] alpha_gateway::GatewayError),
}

/// Result type for terminal operations.
pub type TerminalResult<T> = Result<T, TerminalError>;

impl TerminalError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an invalid transition error.
    pub fn transition(action: impl Into<String>, state: impl Into<String>) -> Self {
        Self::InvalidTransition {
            action: action.into(),
            state: state.into(),
        }
    }
}
