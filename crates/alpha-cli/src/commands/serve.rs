//! Web server command.

use alpha_core::{AdminCredentials, ResearchDesk};
use alpha_web::state::AppState;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Publish the weekday IST bulletin calendar to logged-in sessions
    #[arg(long)]
    pub bulletins: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to the local data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    /// Where `--log` writes, if enabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        if !self.log {
            return None;
        }
        Some(self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|d| d.join("alpha-terminal"))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("serve.log")
        }))
    }
}

pub async fn execute(
    args: ServeArgs,
    desk: ResearchDesk,
    admin: Option<AdminCredentials>,
) -> Result<()> {
    let admin_configured = admin.is_some();
    let state = AppState::new(desk, admin);

    println!();
    println!("  {} {}", "Alpha Terminal".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}       http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    if !admin_configured {
        println!("  {}", "Admin panel disabled (no operator credentials)".yellow());
    }
    if args.bulletins {
        println!("  {}  weekday IST calendar", "Bulletins".green());
    }
    if let Some(path) = args.log_path() {
        println!("  {}        {}", "Log".green(), path.display());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    if args.bulletins {
        tokio::spawn(alpha_web::schedule::run_bulletin_schedule(state.clone()));
    }

    alpha_web::run_server(state, &args.host, args.port).await
}
