//! Research domain models.

use alpha_gateway::SourceCitation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized answer to any analytical request.
///
/// `text` is never empty: it holds either the model's narrative or the
/// task's fallback sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchOutput {
    pub text: String,
    pub sources: Vec<SourceCitation>,
    #[serde(flatten)]
    pub extra: Option<StructuredExtra>,
}

impl ResearchOutput {
    /// Narrative-only output.
    pub fn narrative(text: impl Into<String>, sources: Vec<SourceCitation>) -> Self {
        Self {
            text: text.into(),
            sources,
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: StructuredExtra) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn ipo_listings(&self) -> Option<&[IpoListing]> {
        match &self.extra {
            Some(StructuredExtra::IpoListings(list)) => Some(list),
            _ => None,
        }
    }

    pub fn opportunities(&self) -> Option<&[TopDownOpportunity]> {
        match &self.extra {
            Some(StructuredExtra::Opportunities(list)) => Some(list),
            _ => None,
        }
    }

    pub fn alpha_intel(&self) -> Option<&AlphaIntel> {
        match &self.extra {
            Some(StructuredExtra::AlphaIntel(intel)) => Some(intel),
            _ => None,
        }
    }
}

/// Task-specific typed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StructuredExtra {
    #[serde(rename = "ipoData")]
    IpoListings(Vec<IpoListing>),
    #[serde(rename = "topDownOpportunities")]
    Opportunities(Vec<TopDownOpportunity>),
    #[serde(rename = "alphaIntel")]
    AlphaIntel(AlphaIntel),
}

/// Desk recommendation for an IPO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suggestion {
    Apply,
    Avoid,
    Maybe,
}

impl Suggestion {
    pub const VALUES: [&'static str; 3] = ["APPLY", "AVOID", "MAYBE"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apply => "APPLY",
            Self::Avoid => "AVOID",
            Self::Maybe => "MAYBE",
        }
    }
}

/// One live or upcoming mainboard IPO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoListing {
    pub company: String,
    /// `LIVE` or `UPCOMING`, as reported by the model.
    pub status: String,
    pub open_date: String,
    pub close_date: String,
    pub price_band: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<String>,
    pub gmp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_estimate: Option<String>,
    pub institutional_suggestion: Suggestion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_summary: Option<String>,
}

impl IpoListing {
    /// Open for subscription right now.
    pub fn is_live(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("live")
    }
}

/// One high-conviction idea from the top-down scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDownOpportunity {
    pub company: String,
    pub ticker: String,
    pub sector: String,
    pub rating: String,
    pub upside: String,
    pub rationale: String,
    pub institutional_score: f64,
}

/// Qualitative risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskRating {
    Low,
    Medium,
    High,
}

/// Strengths / weaknesses / opportunities / threats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swot {
    #[serde(rename = "s")]
    pub strengths: Vec<String>,
    #[serde(rename = "w")]
    pub weaknesses: Vec<String>,
    #[serde(rename = "o")]
    pub opportunities: Vec<String>,
    #[serde(rename = "t")]
    pub threats: Vec<String>,
}

/// Moat / risk / SWOT block shown next to a deep-dive narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlphaIntel {
    pub entity: String,
    pub moat_score: u8,
    pub risk_rating: RiskRating,
    pub swot: Swot,
    /// True when the block was synthesized locally rather than read from the model.
    pub simulated: bool,
}

/// Why a research call produced a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Transport,
    Schema,
    Empty,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Transport => "transport",
            Self::Schema => "schema",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed research call with its renderable fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchFailure {
    pub kind: FailureKind,
    /// Diagnostic detail for logs and callers; not meant for end users.
    pub message: String,
    pub output: ResearchOutput,
}

/// Outcome of one analytical operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchResult {
    Success(ResearchOutput),
    Failure(ResearchFailure),
}

impl ResearchResult {
    /// The output to render, whichever variant this is.
    pub fn output(&self) -> &ResearchOutput {
        match self {
            Self::Success(output) => output,
            Self::Failure(failure) => &failure.output,
        }
    }

    pub fn into_output(self) -> ResearchOutput {
        match self {
            Self::Success(output) => output,
            Self::Failure(failure) => failure.output,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.kind),
        }
    }

    /// UI-facing form: the output plus an optional failure tag.
    pub fn view(&self) -> ResearchView<'_> {
        ResearchView {
            ok: self.is_success(),
            failure: match self {
                Self::Success(_) => None,
                Self::Failure(f) => Some(FailureView {
                    kind: f.kind,
                    message: &f.message,
                }),
            },
            output: self.output(),
        }
    }
}

/// Serializable view of a [`ResearchResult`].
#[derive(Debug, Serialize)]
pub struct ResearchView<'a> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureView<'a>>,
    pub output: &'a ResearchOutput,
}

#[derive(Debug, Serialize)]
pub struct FailureView<'a> {
    pub kind: FailureKind,
    pub message: &'a str,
}
