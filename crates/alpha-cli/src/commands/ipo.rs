//! IPO commands.

use alpha_core::ResearchDesk;
use anyhow::{bail, Result};
use clap::Subcommand;

use super::{report, with_spinner, OutputMode};

#[derive(Subcommand)]
pub enum IpoCommands {
    /// List live and upcoming mainboard IPOs
    Scan,

    /// Prospectus audit of one IPO
    Audit {
        /// Company name
        company: String,
    },
}

pub async fn execute(cmd: IpoCommands, desk: &ResearchDesk, mode: OutputMode) -> Result<()> {
    match cmd {
        IpoCommands::Scan => {
            let result = with_spinner("Scanning IPO pipeline...", mode, desk.scan_ipos()).await;
            report("IPO Pipeline", &result, mode)
        }
        IpoCommands::Audit { company } => {
            if company.trim().is_empty() {
                bail!("company must not be empty");
            }
            let company = company.trim();
            let message = format!("Auditing {} prospectus...", company);
            let result = with_spinner(&message, mode, desk.ipo_deep_dive(company)).await;
            report(&format!("IPO Prospectus Audit: {}", company), &result, mode)
        }
    }
}
