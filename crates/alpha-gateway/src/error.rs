//! Gateway error types.

use thiserror::Error;

/// Failure of a single outbound generate call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generative API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response envelope: {0}")]
    Envelope(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Envelope(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Envelope(err.to_string())
    }
}

impl GatewayError {
    /// True when the transport gave up waiting rather than failing outright.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
