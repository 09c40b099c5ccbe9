//! Declared output schemas and the payloads they decode into.

use alpha_gateway::Schema;
use serde::Deserialize;

use super::model::{IpoListing, Suggestion, TopDownOpportunity};

/// Shape of the IPO scan reply.
pub fn ipo_scan() -> Schema {
    let listing = Schema::object(
        vec![
            ("company", Schema::string()),
            ("status", Schema::string()),
            ("openDate", Schema::string()),
            ("closeDate", Schema::string()),
            ("priceBand", Schema::string()),
            ("lotSize", Schema::string()),
            ("gmp", Schema::string()),
            ("listingEstimate", Schema::string()),
            ("institutionalSuggestion", Schema::one_of(&Suggestion::VALUES)),
            ("auditSummary", Schema::string()),
        ],
        &[
            "company",
            "status",
            "openDate",
            "closeDate",
            "priceBand",
            "gmp",
            "institutionalSuggestion",
        ],
    );

    Schema::object(vec![("ipoList", Schema::array(listing))], &["ipoList"])
}

/// Shape of the top-down scan reply.
pub fn top_down() -> Schema {
    let opportunity = Schema::object(
        vec![
            ("company", Schema::string()),
            ("ticker", Schema::string()),
            ("sector", Schema::string()),
            ("rating", Schema::string()),
            ("upside", Schema::string()),
            ("rationale", Schema::string()),
            ("institutionalScore", Schema::number()),
        ],
        &[
            "company",
            "ticker",
            "sector",
            "rating",
            "upside",
            "rationale",
            "institutionalScore",
        ],
    );

    Schema::object(
        vec![
            ("analysisText", Schema::string()),
            ("opportunities", Schema::array(opportunity)),
        ],
        &["analysisText", "opportunities"],
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IpoScanPayload {
    pub ipo_list: Vec<IpoListing>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopDownPayload {
    pub analysis_text: String,
    pub opportunities: Vec<TopDownOpportunity>,
}
