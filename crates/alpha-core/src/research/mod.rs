//! Research operations.
//!
//! Each operation builds one request for its task, sends it through the
//! configured [`GenerativeBackend`] and normalizes whatever comes back.
//! Operations never return an error: failures become a
//! [`ResearchResult::Failure`] carrying a renderable fallback.

pub mod model;
pub mod normalizer;
pub mod prompts;
pub mod schemas;
pub mod task;

use alpha_gateway::{GatewayConfig, GeminiClient, GenerateRequest, GenerativeBackend};
use chrono::{Local, Utc};
use std::sync::Arc;
use tracing::info;

use crate::error::TerminalResult;

pub use model::{
    AlphaIntel, FailureKind, IpoListing, ResearchFailure, ResearchOutput, ResearchResult,
    ResearchView, RiskRating, StructuredExtra, Suggestion, Swot, TopDownOpportunity,
};
pub use normalizer::normalize;
pub use task::{BottomUpMode, BulletinKind, ModelTier, ReplyShape, ResearchTask};

/// Fallback target for the short-term audit when nothing better is known.
pub const DEFAULT_SHORT_TERM_TARGET: &str = "NIFTY";

/// Model names per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoster {
    pub flash: String,
    pub pro: String,
}

impl ModelRoster {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            flash: config.flash_model.clone(),
            pro: config.pro_model.clone(),
        }
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Flash => &self.flash,
            ModelTier::Pro => &self.pro,
        }
    }
}

/// Runs research tasks against a backend.
#[derive(Clone)]
pub struct ResearchDesk {
    backend: Arc<dyn GenerativeBackend>,
    models: ModelRoster,
}

impl ResearchDesk {
    pub fn new(backend: Arc<dyn GenerativeBackend>, models: ModelRoster) -> Self {
        Self { backend, models }
    }

    /// Desk backed by the live Gemini client.
    pub fn from_config(config: &GatewayConfig) -> TerminalResult<Self> {
        let client = GeminiClient::new(config)?;
        Ok(Self::new(Arc::new(client), ModelRoster::from_config(config)))
    }

    pub fn models(&self) -> &ModelRoster {
        &self.models
    }

    /// Build the outbound request for a task.
    pub fn request_for(&self, task: &ResearchTask) -> GenerateRequest {
        GenerateRequest {
            model: self.models.model_for(task.tier()).to_string(),
            prompt: task.prompt(),
            grounding: task.grounding(),
            thinking_budget: task.thinking_budget(),
            max_output_tokens: task.max_output_tokens(),
            schema: task.schema(),
        }
    }

    /// Issue exactly one request for `task` and normalize the reply.
    pub async fn run(&self, task: &ResearchTask) -> ResearchResult {
        let request = self.request_for(task);
        info!(task = task.name(), model = %request.model, "Research request issued");

        let reply = self.backend.generate(&request).await;
        let result = normalize(task, reply);

        if result.is_success() {
            info!(
                task = task.name(),
                sources = result.output().sources.len(),
                "Research request completed"
            );
        }
        result
    }

    /// Today's institutional morning brief.
    pub async fn morning_brief(&self) -> ResearchResult {
        self.run(&ResearchTask::MorningBrief {
            date: Local::now().date_naive(),
        })
        .await
    }

    /// Live and upcoming mainboard IPOs.
    pub async fn scan_ipos(&self) -> ResearchResult {
        self.run(&ResearchTask::IpoScan).await
    }

    /// Prospectus audit for one IPO.
    pub async fn ipo_deep_dive(&self, company: &str) -> ResearchResult {
        self.run(&ResearchTask::IpoDeepDive {
            company: company.to_string(),
        })
        .await
    }

    /// Macro → sector → stock scan.
    pub async fn top_down(&self) -> ResearchResult {
        self.run(&ResearchTask::TopDown).await
    }

    /// Forensic and technical audit of one company.
    pub async fn company_deep_dive(&self, company: &str) -> ResearchResult {
        self.run(&ResearchTask::CompanyDeepDive {
            company: company.to_string(),
        })
        .await
    }

    pub async fn bottom_up(&self, query: &str, mode: BottomUpMode) -> ResearchResult {
        self.run(&ResearchTask::BottomUp {
            query: query.to_string(),
            mode,
        })
        .await
    }

    /// Desk bulletin stamped with the current IST time.
    pub async fn bulletin(&self, kind: BulletinKind) -> ResearchResult {
        self.run(&ResearchTask::Bulletin {
            kind,
            issued_at: Utc::now().with_timezone(&task::ist()),
        })
        .await
    }
}

/// Query for the short-term technical audit.
///
/// Uses the current search text if any, else the first all-caps word of at
/// least three letters in the morning brief, else [`DEFAULT_SHORT_TERM_TARGET`].
pub fn short_term_query(search: Option<&str>, brief_text: Option<&str>) -> String {
    let target = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| brief_text.and_then(first_ticker_like).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_SHORT_TERM_TARGET.to_string());

    format!("{} SHORT TERM TECHNICAL & MOMENTUM AUDIT", target)
}

fn first_ticker_like(text: &str) -> Option<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .find(|word| word.len() >= 3 && word.bytes().all(|b| b.is_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_gateway::{GatewayError, GatewayResult, GenerateReply, GroundingChunk, WebReference};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed reply and records every request it sees.
    struct StubBackend {
        reply: GatewayResult<GenerateReply>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl StubBackend {
        fn new(reply: GatewayResult<GenerateReply>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn text(text: &str) -> Arc<Self> {
            Self::new(Ok(GenerateReply {
                text: Some(text.to_string()),
                grounding: Vec::new(),
            }))
        }

        fn requests(&self) -> Vec<GenerateRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeBackend for StubBackend {
        async fn generate(&self, request: &GenerateRequest) -> GatewayResult<GenerateReply> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    fn roster() -> ModelRoster {
        ModelRoster {
            flash: "flash-model".to_string(),
            pro: "pro-model".to_string(),
        }
    }

    fn desk(backend: Arc<StubBackend>) -> ResearchDesk {
        ResearchDesk::new(backend, roster())
    }

    #[tokio::test]
    async fn test_one_request_per_operation() {
        let backend = StubBackend::text("Markets steady.");
        let desk = desk(backend.clone());

        let result = desk.morning_brief().await;
        assert!(result.is_success());
        assert_eq!(result.output().text, "Markets steady.");

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "flash-model");
        assert!(requests[0].grounding);
        assert!(requests[0].schema.is_none());
    }

    #[tokio::test]
    async fn test_ipo_scan_request_declares_schema() {
        let backend = StubBackend::text(r#"{"ipoList":[]}"#);
        let desk = desk(backend.clone());

        let result = desk.scan_ipos().await;
        assert!(result.is_success());
        assert_eq!(result.output().ipo_listings().unwrap().len(), 0);

        let request = &backend.requests()[0];
        assert!(request.schema.is_some());
        assert_eq!(request.model, "flash-model");
    }

    #[tokio::test]
    async fn test_deep_dive_network_error_names_entity() {
        let backend = StubBackend::new(Err(GatewayError::Transport("network error".into())));
        let desk = desk(backend.clone());

        let result = desk.company_deep_dive("Acme").await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Transport));
        assert!(result.output().text.contains("Acme"));
        assert!(result.output().sources.is_empty());

        let request = &backend.requests()[0];
        assert_eq!(request.model, "pro-model");
        assert_eq!(request.thinking_budget, Some(15_000));
        assert!(request.prompt.contains("\"Acme\""));
    }

    #[tokio::test]
    async fn test_identical_inputs_give_equal_results() {
        let backend = StubBackend::new(Ok(GenerateReply {
            text: Some("Report body".to_string()),
            grounding: vec![GroundingChunk {
                web: Some(WebReference {
                    title: None,
                    uri: Some("http://x".to_string()),
                }),
            }],
        }));
        let desk = desk(backend);

        let first = desk.company_deep_dive("Acme").await;
        let second = desk.company_deep_dive("Acme").await;
        assert_eq!(first, second);
        assert_eq!(first.output().sources[0].title, "Audit Intel");
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back() {
        let desk = desk(StubBackend::text(""));
        let result = desk.ipo_deep_dive("Acme").await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Empty));
        assert_eq!(result.output().text, "Deep dive node standby.");
        assert!(result.output().sources.is_empty());
    }

    #[tokio::test]
    async fn test_bulletin_is_capped_and_ungrounded() {
        let backend = StubBackend::text("**Post-Market Analysis**");
        let desk = desk(backend.clone());

        let result = desk.bulletin(BulletinKind::PostMarket).await;
        assert!(result.is_success());
        let request = &backend.requests()[0];
        assert!(!request.grounding);
        assert_eq!(request.max_output_tokens, Some(800));
    }

    #[tokio::test]
    async fn test_top_down_uses_pro_model() {
        let backend = StubBackend::text("garbage");
        let desk = desk(backend.clone());

        let result = desk.top_down().await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Schema));
        assert_eq!(backend.requests()[0].thinking_budget, Some(10_000));
        assert_eq!(backend.requests()[0].model, "pro-model");
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(ResearchDesk::from_config(&GatewayConfig::with_api_key("")).is_err());

        let desk = ResearchDesk::from_config(&GatewayConfig::with_api_key("k-123")).unwrap();
        assert_eq!(desk.models().flash, alpha_gateway::config::DEFAULT_FLASH_MODEL);
    }

    #[test]
    fn test_short_term_query_prefers_search() {
        assert_eq!(
            short_term_query(Some(" TCS "), Some("Watch HDFCBANK today")),
            "TCS SHORT TERM TECHNICAL & MOMENTUM AUDIT"
        );
    }

    #[test]
    fn test_short_term_query_from_brief() {
        assert_eq!(
            short_term_query(None, Some("Global cues mixed; watch Reliance and INFY, HDFCBANK.")),
            "INFY SHORT TERM TECHNICAL & MOMENTUM AUDIT"
        );
        assert_eq!(
            short_term_query(Some(""), Some("US and UK markets")),
            "NIFTY SHORT TERM TECHNICAL & MOMENTUM AUDIT"
        );
    }

    #[test]
    fn test_short_term_query_default() {
        assert_eq!(
            short_term_query(None, None),
            "NIFTY SHORT TERM TECHNICAL & MOMENTUM AUDIT"
        );
    }
}
