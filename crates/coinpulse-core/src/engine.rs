//! CoinPulse - the main entry point for the core library.
//!
//! Opens the data directory once and hands out the services built on it.
//! Both the desktop app and the CLI start here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::chat::{ChatClient, Conversation};
use crate::config::{AppConfig, DATABASE_FILE_NAME};
use crate::connectivity::{ConnectivityMonitor, NetworkProbe};
use crate::controller::LiveDataController;
use crate::error::CoreResult;
use crate::market::MarketClient;
use crate::offline::{HttpAssetSource, OfflineCache};
use crate::session::SessionStore;
use crate::storage::Storage;

pub struct CoinPulse {
    data_dir: PathBuf,
    config: AppConfig,
    storage: Storage,
    session: SessionStore,
}

impl CoinPulse {
    /// Open `data_dir`, loading `config.toml` and restoring the session.
    pub fn open(data_dir: impl AsRef<Path>) -> CoreResult<Self> {
        let config = AppConfig::load(data_dir.as_ref())?;
        Self::with_config(data_dir, config)
    }

    pub fn with_config(data_dir: impl AsRef<Path>, config: AppConfig) -> CoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        info!(?data_dir, "Opening CoinPulse");

        std::fs::create_dir_all(&data_dir)?;
        let storage = Storage::new(data_dir.join(DATABASE_FILE_NAME))?;
        let session = SessionStore::open(storage.clone())?;

        Ok(Self {
            data_dir,
            config,
            storage,
            session,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn market_client(&self) -> CoreResult<MarketClient> {
        MarketClient::new(self.config.market.clone())
    }

    pub fn chat_client(&self) -> CoreResult<ChatClient> {
        ChatClient::new(&self.config.chat)
    }

    /// Empty conversation honoring the configured history limit.
    pub fn conversation(&self) -> Conversation {
        Conversation::new(self.config.chat.history_limit)
    }

    pub fn offline_cache(&self) -> OfflineCache {
        OfflineCache::new(self.storage.clone())
    }

    /// Asset source for [`OfflineCache::precache`] reading from `origin`.
    pub fn asset_source(&self, origin: impl Into<String>) -> CoreResult<HttpAssetSource> {
        let http = reqwest::Client::builder()
            .timeout(self.config.market.request_timeout())
            .build()?;
        Ok(HttpAssetSource::new(http, origin))
    }

    /// Connectivity monitor driven by the configured network probe.
    pub async fn connectivity(&self) -> ConnectivityMonitor {
        let probe = NetworkProbe::from_config(&self.config.connectivity);
        ConnectivityMonitor::with_probe(probe, self.config.connectivity.probe_interval()).await
    }

    /// Controller polling the configured market provider.
    pub fn live(&self, connectivity: ConnectivityMonitor) -> CoreResult<LiveDataController> {
        let source = Arc::new(self.market_client()?);
        Ok(LiveDataController::new(
            self.session.clone(),
            connectivity,
            source,
            self.config.market.poll_interval(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("nested").join("coinpulse");

        let app = CoinPulse::open(&data_dir).unwrap();
        assert!(data_dir.join(DATABASE_FILE_NAME).exists());
        assert!(!app.session().is_authenticated());
        assert_eq!(app.logs_dir(), data_dir.join("logs"));
    }

    #[test]
    fn test_session_survives_reopen() {
        let temp = TempDir::new().unwrap();

        {
            let app = CoinPulse::open(temp.path()).unwrap();
            app.session().login("mock-oauth-token").unwrap();
        }

        let app = CoinPulse::open(temp.path()).unwrap();
        assert_eq!(app.session().session().unwrap().token(), "mock-oauth-token");
    }

    #[test]
    fn test_open_reads_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[chat]\nhistory_limit = 4\n",
        )
        .unwrap();

        let app = CoinPulse::open(temp.path()).unwrap();
        assert_eq!(app.config().chat.history_limit, 4);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[chat\n").unwrap();

        assert!(matches!(
            CoinPulse::open(temp.path()),
            Err(crate::error::CoreError::Config(_))
        ));
    }
}
