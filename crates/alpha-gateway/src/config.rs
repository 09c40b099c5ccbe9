//! Connection settings for the generative-language API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for fast, shallow tasks (brief, IPO scan, bulletins).
pub const DEFAULT_FLASH_MODEL: &str = "gemini-3-flash-preview";

/// Default model for reasoning-heavy tasks (audits, top-down scan).
pub const DEFAULT_PRO_MODEL: &str = "gemini-3-pro-preview";

/// Default request timeout in seconds. Zero leaves the transport default in place.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings used to construct a [`crate::GeminiClient`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_flash_model")]
    pub flash_model: String,
    #[serde(default = "default_pro_model")]
    pub pro_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Config with the given key and every other field at its default.
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: default_base_url(),
            flash_model: default_flash_model(),
            pro_model: default_pro_model(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// API key with all but the last four characters masked.
    pub fn redacted_key(&self) -> String {
        let visible: String = self
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if self.api_key.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("****{}", visible)
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.redacted_key())
            .field("base_url", &self.base_url)
            .field("flash_model", &self.flash_model)
            .field("pro_model", &self.pro_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_flash_model() -> String {
    DEFAULT_FLASH_MODEL.to_string()
}

fn default_pro_model() -> String {
    DEFAULT_PRO_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
