//! Alpha Terminal CLI
//!
//! Institutional research for Indian equities from the command line.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

const DEFAULT_FILTER: &str = "alpha=info,alpha_core=info,alpha_gateway=info,alpha_web=debug";

/// Initialize tracing with optional file logging.
///
/// Console output goes to stderr so `--json` output on stdout stays clean.
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return None;
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let _ = std::fs::create_dir_all(dir);
    let file_name = path.file_name().unwrap_or_else(|| OsStr::new("serve.log"));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) => args.log_path(),
        _ => None,
    };
    let _guard = init_tracing(log_file.as_deref());

    cli.execute().await
}
