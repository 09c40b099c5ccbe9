//! Configuration display.

use alpha_core::TerminalConfig;
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

use super::OutputMode;

pub fn execute(config: &TerminalConfig, path: Option<&Path>, mode: OutputMode) -> Result<()> {
    let gateway = &config.gateway;
    let source = path
        .map(Path::to_path_buf)
        .or_else(|| TerminalConfig::default_path().filter(|p| p.exists()));
    let timeout = match gateway.timeout_secs {
        0 => "disabled".to_string(),
        secs => format!("{}s", secs),
    };

    if mode.json {
        let value = json!({
            "configFile": source.as_ref().map(|p| p.display().to_string()),
            "apiKey": gateway.redacted_key(),
            "baseUrl": gateway.base_url,
            "flashModel": gateway.flash_model,
            "proModel": gateway.pro_model,
            "timeoutSecs": gateway.timeout_secs,
            "adminEmail": config.admin.as_ref().map(|a| a.email.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Alpha Terminal Configuration".bold());
    println!("{}", "─".repeat(40));
    match &source {
        Some(p) => println!("  Config file: {}", p.display()),
        None => println!("  Config file: {}", "none (environment only)".dimmed()),
    }
    println!("  API key:     {}", gateway.redacted_key());
    println!("  Base URL:    {}", gateway.base_url);
    println!("  Flash model: {}", gateway.flash_model.cyan());
    println!("  Pro model:   {}", gateway.pro_model.cyan());
    println!("  Timeout:     {}", timeout);
    match &config.admin {
        Some(admin) => println!("  Admin:       {}", admin.email),
        None => println!("  Admin:       {}", "not configured".dimmed()),
    }
    println!("{}", "─".repeat(40));

    Ok(())
}
