//! Application configuration.
//!
//! Read from `<data_dir>/config.toml`. Every field has a default, so a missing
//! file or a partial file is fine; a malformed file is an error.
//!
//! ```toml
//! [market]
//! poll_interval_ms = 5000
//!
//! [chat]
//! base_url = "http://localhost:8000"
//!
//! [connectivity]
//! probe_addr = "1.1.1.1:443"
//! ```
//!
//! Environment overrides (applied after the file):
//! `COINPULSE_MARKET_URL`, `COINGECKO_API_KEY`, `COINPULSE_API_URL`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::CoreResult;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "coinpulse.redb";

/// Default data directory: `<platform data dir>/coinpulse`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coinpulse")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub market: MarketConfig,
    pub chat: ChatConfig,
    pub connectivity: ConnectivityConfig,
}

/// Market data provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub base_url: String,
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    /// Sent as `x-cg-demo-api-key` when present
    pub api_key: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: 100,
            page: 1,
            sparkline: false,
            poll_interval_ms: 5000,
            request_timeout_ms: 10_000,
            api_key: None,
        }
    }
}

impl MarketConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Chat backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    /// How many previous turns travel with each question
    pub history_limit: usize,
    pub request_timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            history_limit: 10,
            request_timeout_ms: 30_000,
        }
    }
}

impl ChatConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Reachability probe settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// `host:port` the probe opens a TCP connection to
    pub probe_addr: String,
    pub probe_interval_ms: u64,
    pub probe_timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_addr: "1.1.1.1:443".to_string(),
            probe_interval_ms: 3000,
            probe_timeout_ms: 1500,
        }
    }
}

impl ConnectivityConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `config.toml` from `data_dir` and apply environment overrides.
    pub fn load(data_dir: impl AsRef<Path>) -> CoreResult<Self> {
        let path = data_dir.as_ref().join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            debug!(path = %path.display(), "Loading config");
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml_str(&content)?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("COINPULSE_MARKET_URL").filter(|v| !v.is_empty()) {
            self.market.base_url = url;
        }
        if let Some(key) = lookup("COINGECKO_API_KEY").filter(|v| !v.is_empty()) {
            self.market.api_key = Some(key);
        }
        if let Some(url) = lookup("COINPULSE_API_URL").filter(|v| !v.is_empty()) {
            self.chat.base_url = url;
        }
    }
}
