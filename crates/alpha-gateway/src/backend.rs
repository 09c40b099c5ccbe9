//! The seam between research tasks and whatever produces completions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::envelope::GroundingChunk;
use crate::error::GatewayResult;
use crate::schema::Schema;

/// A single generate call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Let the model consult web search and return grounding metadata.
    pub grounding: bool,
    pub thinking_budget: Option<u32>,
    pub max_output_tokens: Option<u32>,
    /// When set, the reply body must be JSON conforming to this schema.
    pub schema: Option<Schema>,
}

/// Answer text plus raw grounding references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateReply {
    pub text: Option<String>,
    #[serde(default)]
    pub grounding: Vec<GroundingChunk>,
}

/// Anything that can answer a [`GenerateRequest`].
///
/// Implementations issue exactly one outbound call per invocation and never retry.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> GatewayResult<GenerateReply>;
}
