//! Process configuration.
//!
//! Resolved once at start-up: an optional TOML file, then environment
//! overrides. Credentials never live in source.

use alpha_gateway::config::{DEFAULT_BASE_URL, DEFAULT_FLASH_MODEL, DEFAULT_PRO_MODEL, DEFAULT_TIMEOUT_SECS};
use alpha_gateway::GatewayConfig;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{TerminalError, TerminalResult};

/// Operator credentials that unlock the admin panel.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    pub gateway: GatewayConfig,
    pub admin: Option<AdminCredentials>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    gateway: FileGateway,
    admin: Option<AdminCredentials>,
}

#[derive(Debug, Default, Deserialize)]
struct FileGateway {
    api_key: Option<String>,
    base_url: Option<String>,
    flash_model: Option<String>,
    pro_model: Option<String>,
    timeout_secs: Option<u64>,
}

impl TerminalConfig {
    /// Default config file location (`~/.config/alpha-terminal/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("alpha-terminal").join("config.toml"))
    }

    /// Load from `path` (which must exist) or the default location (which may not),
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> TerminalResult<Self> {
        let contents = match path {
            Some(p) => Some(std::fs::read_to_string(p)?),
            None => Self::default_path()
                .filter(|p| p.exists())
                .map(std::fs::read_to_string)
                .transpose()?,
        };

        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve from TOML text and an environment lookup.
    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> TerminalResult<Self> {
        let file: FileConfig = match file {
            Some(text) => toml::from_str(text)?,
            None => FileConfig::default(),
        };
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_key = env("GEMINI_API_KEY")
            .or_else(|| env("API_KEY"))
            .or(file.gateway.api_key)
            .ok_or_else(|| {
                TerminalError::Config(
                    "no API key configured; set GEMINI_API_KEY or [gateway].api_key".to_string(),
                )
            })?;

        let timeout_secs = match env("ALPHA_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                TerminalError::Config(format!("ALPHA_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => file.gateway.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let gateway = GatewayConfig {
            api_key,
            base_url: env("GEMINI_BASE_URL")
                .or(file.gateway.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            flash_model: env("ALPHA_FLASH_MODEL")
                .or(file.gateway.flash_model)
                .unwrap_or_else(|| DEFAULT_FLASH_MODEL.to_string()),
            pro_model: env("ALPHA_PRO_MODEL")
                .or(file.gateway.pro_model)
                .unwrap_or_else(|| DEFAULT_PRO_MODEL.to_string()),
            timeout_secs,
        };

        let admin = match (env("ALPHA_ADMIN_EMAIL"), env("ALPHA_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminCredentials { email, password }),
            _ => file.admin,
        };

        debug!(
            base_url = %gateway.base_url,
            flash_model = %gateway.flash_model,
            pro_model = %gateway.pro_model,
            admin_configured = admin.is_some(),
            "Configuration resolved"
        );

        Ok(Self { gateway, admin })
    }
}
