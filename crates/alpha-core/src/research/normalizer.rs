//! Shapes gateway replies into [`ResearchResult`]s.
//!
//! Terminal states are success-with-data or failure-with-fallback. Citations
//! are attached whenever the reply got far enough to carry them, even when
//! the body itself is unusable.

use alpha_gateway::{extract_citations, extract_json, GatewayError, GatewayResult, GenerateReply};
use serde::de::DeserializeOwned;

use super::model::{FailureKind, ResearchFailure, ResearchOutput, ResearchResult, StructuredExtra};
use super::schemas::{IpoScanPayload, TopDownPayload};
use super::task::{ReplyShape, ResearchTask};

const IPO_SCAN_COMPLETE: &str = "IPO Scan Complete.";
const TOP_DOWN_COMPLETE: &str = "Institutional scanning complete.";

/// Map a raw gateway outcome for `task` onto a result.
pub fn normalize(task: &ResearchTask, reply: GatewayResult<GenerateReply>) -> ResearchResult {
    let reply = match reply {
        Ok(reply) => reply,
        Err(err) => {
            return failure(
                task,
                failure_kind(&err),
                err.to_string(),
                ResearchOutput::narrative(task.failure_text(), Vec::new()),
            )
        }
    };

    let sources = extract_citations(&reply.grounding, task.citation_label());
    let Some(text) = reply.text.filter(|t| !t.trim().is_empty()) else {
        return failure(
            task,
            FailureKind::Empty,
            "reply carried no text".to_string(),
            ResearchOutput::narrative(task.empty_text(), sources),
        );
    };

    match task.reply_shape() {
        ReplyShape::Narrative => {
            let output = ResearchOutput::narrative(text, sources);
            ResearchResult::Success(match task.simulated_intel() {
                Some(intel) => output.with_extra(StructuredExtra::AlphaIntel(intel)),
                None => output,
            })
        }
        ReplyShape::IpoListings => match parse::<IpoScanPayload>(&text) {
            Ok(payload) => ResearchResult::Success(
                ResearchOutput::narrative(IPO_SCAN_COMPLETE, sources)
                    .with_extra(StructuredExtra::IpoListings(payload.ipo_list)),
            ),
            Err(message) => schema_failure(task, message, sources),
        },
        ReplyShape::TopDown => match parse::<TopDownPayload>(&text) {
            Ok(payload) => {
                let narrative = match payload.analysis_text.trim() {
                    "" => TOP_DOWN_COMPLETE.to_string(),
                    analysis => analysis.to_string(),
                };
                ResearchResult::Success(
                    ResearchOutput::narrative(narrative, sources)
                        .with_extra(StructuredExtra::Opportunities(payload.opportunities)),
                )
            }
            Err(message) => schema_failure(task, message, sources),
        },
    }
}

/// Classify a gateway error.
pub fn failure_kind(err: &GatewayError) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Transport
    }
}

/// Decode the raw body first; only fall back to fence stripping when the
/// body is not JSON as sent. String values may carry Markdown fences.
fn parse<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    serde_json::from_str(text.trim())
        .or_else(|_| serde_json::from_str(extract_json(text)))
        .map_err(|e| format!("reply does not match schema: {}", e))
}

fn schema_failure(
    task: &ResearchTask,
    message: String,
    sources: Vec<alpha_gateway::SourceCitation>,
) -> ResearchResult {
    failure(
        task,
        FailureKind::Schema,
        message,
        ResearchOutput::narrative(task.failure_text(), sources),
    )
}

fn failure(
    task: &ResearchTask,
    kind: FailureKind,
    message: String,
    output: ResearchOutput,
) -> ResearchResult {
    tracing::error!(task = task.name(), kind = %kind, error = %message, "Research call fell back");
    ResearchResult::Failure(ResearchFailure {
        kind,
        message,
        output,
    })
}
