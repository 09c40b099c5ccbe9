//! # Alpha Gateway
//!
//! Outbound side of the terminal: builds one generate-content request per
//! analytical task, optionally constrained to a declared JSON schema and
//! grounded with web search, and decodes the reply envelope.
//!
//! Everything above the wire (prompts, fallbacks, result shaping) lives in
//! `alpha-core`.

pub mod backend;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod grounding;
pub mod schema;

pub use backend::{GenerateReply, GenerateRequest, GenerativeBackend};
pub use client::GeminiClient;
pub use config::GatewayConfig;
pub use envelope::{GroundingChunk, WebReference};
pub use error::{GatewayError, GatewayResult};
pub use grounding::{extract_citations, extract_json, SourceCitation, PLACEHOLDER_URI};
pub use schema::{Schema, SchemaType};
