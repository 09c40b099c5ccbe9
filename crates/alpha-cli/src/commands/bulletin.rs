//! Desk bulletin command.

use alpha_core::research::BulletinKind;
use alpha_core::ResearchDesk;
use anyhow::Result;
use clap::{Args, ValueEnum};

use super::{report, with_spinner, OutputMode};

#[derive(Args)]
pub struct BulletinArgs {
    /// Bulletin to generate
    #[arg(value_enum)]
    pub kind: KindArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    PreMarket,
    SwingSignal,
    FundamentalPick,
    MarketSnapshot,
    PostMarket,
}

impl From<KindArg> for BulletinKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::PreMarket => BulletinKind::PreMarket,
            KindArg::SwingSignal => BulletinKind::SwingSignal,
            KindArg::FundamentalPick => BulletinKind::FundamentalPick,
            KindArg::MarketSnapshot => BulletinKind::MarketSnapshot,
            KindArg::PostMarket => BulletinKind::PostMarket,
        }
    }
}

pub async fn execute(args: BulletinArgs, desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    let kind = BulletinKind::from(args.kind);
    let message = format!("Generating {} bulletin...", kind.as_str());

    let result = with_spinner(&message, mode, desk.bulletin(kind)).await;
    report(&format!("Bulletin: {}", kind.as_str()), &result, mode)
}
