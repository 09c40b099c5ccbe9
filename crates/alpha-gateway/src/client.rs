//! HTTP client for the generate-content endpoint.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::backend::{GenerateReply, GenerateRequest, GenerativeBackend};
use crate::config::GatewayConfig;
use crate::envelope::{GenerateContentRequest, GenerateContentResponse};
use crate::error::{GatewayError, GatewayResult};

/// Generative-language REST client.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client from resolved configuration.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::Config("API key is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().unwrap_or_default();

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> GatewayResult<GenerateReply> {
        let body = GenerateContentRequest::from_request(request);

        debug!(
            model = %request.model,
            grounding = request.grounding,
            structured = request.schema.is_some(),
            "Calling generate-content"
        );

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&raw)?;
        let reply = envelope.into_reply();

        debug!(
            text_len = reply.text.as_ref().map(|t| t.len()).unwrap_or(0),
            grounding = reply.grounding.len(),
            "Generate-content reply decoded"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_rejected() {
        let config = GatewayConfig::with_api_key("  ");
        assert!(matches!(GeminiClient::new(&config), Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = GatewayConfig::with_api_key("key");
        config.base_url = "http://localhost:8080/".to_string();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("gemini-3-pro-preview"),
            "http://localhost:8080/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let mut config = GatewayConfig::with_api_key("key");
        config.base_url = "http://127.0.0.1:1".to_string();
        config.timeout_secs = 5;
        let client = GeminiClient::new(&config).unwrap();

        let request = GenerateRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            grounding: false,
            thinking_budget: None,
            max_output_tokens: None,
            schema: None,
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_) | GatewayError::Timeout(_)));
    }
}
