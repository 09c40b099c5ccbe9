//! Wire types for the generate-content endpoint.

use serde::{Deserialize, Serialize};

use crate::backend::{GenerateReply, GenerateRequest};
use crate::schema::Schema;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

impl<'a> GenerateContentRequest<'a> {
    pub(crate) fn from_request(request: &'a GenerateRequest) -> Self {
        let tools = if request.grounding {
            vec![Tool { google_search: GoogleSearch {} }]
        } else {
            Vec::new()
        };

        let generation_config = GenerationConfig {
            response_mime_type: request.schema.as_ref().map(|_| JSON_MIME_TYPE),
            response_schema: request.schema.as_ref(),
            thinking_config: request
                .thinking_budget
                .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            max_output_tokens: request.max_output_tokens,
        };
        let has_config = generation_config.response_schema.is_some()
            || generation_config.thinking_config.is_some()
            || generation_config.max_output_tokens.is_some();

        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: &request.prompt }],
            }],
            tools,
            generation_config: has_config.then_some(generation_config),
        }
    }
}

/// Decoded response envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding reference. Only chunks carrying `web` become citations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebReference {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl GenerateContentResponse {
    /// Collapse the envelope to the first candidate's answer text and grounding.
    ///
    /// Thought parts are skipped. `text` is `None` when the candidate carries
    /// no text parts at all.
    pub fn into_reply(self) -> GenerateReply {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GenerateReply::default();
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();

        GenerateReply {
            text: if texts.is_empty() { None } else { Some(texts.concat()) },
            grounding: candidate
                .grounding_metadata
                .map(|m| m.grounding_chunks)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(schema: Option<Schema>, grounding: bool) -> GenerateRequest {
        GenerateRequest {
            model: "m".to_string(),
            prompt: "hello".to_string(),
            grounding,
            thinking_budget: None,
            max_output_tokens: None,
            schema,
        }
    }

    #[test]
    fn test_plain_grounded_request() {
        let req = request(None, true);
        let body = serde_json::to_value(GenerateContentRequest::from_request(&req)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "tools": [{ "googleSearch": {} }]
            })
        );
    }

    #[test]
    fn test_schema_request_sets_json_mime_type() {
        let mut req = request(Some(Schema::object(vec![("a", Schema::string())], &["a"])), false);
        req.thinking_budget = Some(10000);
        let body = serde_json::to_value(GenerateContentRequest::from_request(&req)).unwrap();

        assert!(body.get("tools").is_none());
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(config["thinkingConfig"]["thinkingBudget"], 10000);
        assert!(config.get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_into_reply_joins_text_and_skips_thoughts() {
        let envelope: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "Hello " },
                    { "text": "world" }
                ]},
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "title": "X", "uri": "http://x" } },
                    { "retrievedContext": { "uri": "gs://y" } }
                ]}
            }]
        }))
        .unwrap();

        let reply = envelope.into_reply();
        assert_eq!(reply.text.as_deref(), Some("Hello world"));
        assert_eq!(reply.grounding.len(), 2);
        assert!(reply.grounding[1].web.is_none());
    }

    #[test]
    fn test_into_reply_without_candidates() {
        let envelope: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        let reply = envelope.into_reply();
        assert!(reply.text.is_none());
        assert!(reply.grounding.is_empty());
    }
}
