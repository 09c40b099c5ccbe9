//! Single-shot research commands.

use alpha_core::research::{short_term_query, BottomUpMode};
use alpha_core::ResearchDesk;
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use super::{report, with_spinner, OutputMode};

#[derive(Args)]
pub struct AuditArgs {
    /// Company name or ticker
    pub company: String,
}

#[derive(Args)]
pub struct ShortTermArgs {
    /// Ticker to audit
    #[arg(long)]
    pub search: Option<String>,

    /// Morning brief text to pick a ticker from when no search is given
    #[arg(long)]
    pub brief_text: Option<String>,
}

#[derive(Args)]
pub struct BottomUpArgs {
    /// Company, ticker or headline
    pub query: String,

    /// How to read the query
    #[arg(long, value_enum, default_value_t = ModeArg::Entity)]
    pub mode: ModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Entity,
    NewsImpact,
}

impl From<ModeArg> for BottomUpMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Entity => BottomUpMode::Entity,
            ModeArg::NewsImpact => BottomUpMode::NewsImpact,
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{} must not be empty", field);
    }
    Ok(())
}

pub async fn brief(desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    let result = with_spinner("Syncing morning brief...", mode, desk.morning_brief()).await;
    report("Institutional Morning Brief", &result, mode)
}

pub async fn top_down(desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    let result = with_spinner("Running top-down scan...", mode, desk.top_down()).await;
    report("Top-Down Equity Research", &result, mode)
}

pub async fn audit(args: AuditArgs, desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    require("company", &args.company)?;
    let company = args.company.trim();

    let message = format!("Auditing {}...", company);
    let result = with_spinner(&message, mode, desk.company_deep_dive(company)).await;
    report(&format!("Forensic & Technical Audit: {}", company), &result, mode)
}

pub async fn short_term(args: ShortTermArgs, desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    let query = short_term_query(args.search.as_deref(), args.brief_text.as_deref());

    let result = with_spinner("Running short-term audit...", mode, desk.company_deep_dive(&query)).await;
    report(&query, &result, mode)
}

pub async fn bottom_up(args: BottomUpArgs, desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    require("query", &args.query)?;
    let query = args.query.trim();

    let result = with_spinner(
        "Running bottom-up analysis...",
        mode,
        desk.bottom_up(query, args.mode.into()),
    )
    .await;
    report(&format!("Bottom-Up Analysis: {}", query), &result, mode)
}
