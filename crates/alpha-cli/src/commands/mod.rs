//! CLI command definitions and handlers.

use alpha_core::{ResearchDesk, ResearchResult, TerminalConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::output;

pub mod bulletin;
pub mod config;
pub mod ipo;
pub mod research;
pub mod serve;

/// Alpha Terminal - institutional research for Indian equities
#[derive(Parser)]
#[command(name = "alpha")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to ~/.config/alpha-terminal/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the raw result as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Today's institutional morning brief
    Brief,

    /// IPO scan and prospectus audits
    #[command(subcommand)]
    Ipo(ipo::IpoCommands),

    /// Macro to sector to stock scan
    TopDown,

    /// Forensic and technical audit of a company
    Audit(research::AuditArgs),

    /// Short-term technical audit of a ticker
    ShortTerm(research::ShortTermArgs),

    /// Bottom-up analysis of a company or a headline
    BottomUp(research::BottomUpArgs),

    /// Generate a desk bulletin
    Bulletin(bulletin::BulletinArgs),

    /// Start the web server
    Serve(serve::ServeArgs),

    /// Show the resolved configuration
    Config,
}

/// Global output options shared by every research command.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub json: bool,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = TerminalConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        let mode = OutputMode { json: self.json };

        match self.command {
            Commands::Brief => research::brief(&open_desk(&config)?, mode).await,
            Commands::Ipo(cmd) => ipo::execute(cmd, &open_desk(&config)?, mode).await,
            Commands::TopDown => research::top_down(&open_desk(&config)?, mode).await,
            Commands::Audit(args) => research::audit(args, &open_desk(&config)?, mode).await,
            Commands::ShortTerm(args) => {
                research::short_term(args, &open_desk(&config)?, mode).await
            }
            Commands::BottomUp(args) => {
                research::bottom_up(args, &open_desk(&config)?, mode).await
            }
            Commands::Bulletin(args) => bulletin::execute(args, &open_desk(&config)?, mode).await,
            Commands::Serve(args) => serve::execute(args, open_desk(&config)?, config.admin).await,
            Commands::Config => config::execute(&config, self.config.as_deref(), mode),
        }
    }
}

fn open_desk(config: &TerminalConfig) -> Result<ResearchDesk> {
    ResearchDesk::from_config(&config.gateway).context("Failed to initialize the research gateway")
}

/// Await a research call behind a spinner.
pub async fn with_spinner(
    message: &str,
    mode: OutputMode,
    research: impl Future<Output = ResearchResult>,
) -> ResearchResult {
    let spinner = if mode.json {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let result = research.await;
    spinner.finish_and_clear();
    result
}

/// Print a result in the selected output mode.
pub fn report(title: &str, result: &ResearchResult, mode: OutputMode) -> Result<()> {
    if mode.json {
        println!("{}", serde_json::to_string_pretty(&result.view())?);
    } else {
        output::print_research(title, result);
    }
    Ok(())
}
