//! Persistent storage using redb.
//!
//! Two tables live in one database file:
//! - `session`: the single opaque auth token slot
//! - `offline_assets`: precached offline assets, keyed by `<cache version>|<path>`

use crate::error::CoreError;
use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const SESSION_TABLE: TableDefinition<&str, &str> = TableDefinition::new("session");
const ASSETS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("offline_assets");

/// Separator between cache version and asset path in asset keys.
const ASSET_KEY_SEPARATOR: char = '|';

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl Storage {
    /// Token slot key (there is only one session per installation)
    const AUTH_TOKEN_KEY: &'static str = "auth_token";

    /// Create a new storage instance at the given path.
    ///
    /// Creates the parent directory and all tables if needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SESSION_TABLE)?;
            let _ = write_txn.open_table(ASSETS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Session Token
    // ═══════════════════════════════════════════════════════════════════════

    /// Persist the auth token, replacing any previous one.
    pub fn save_auth_token(&self, token: &str) -> Result<(), CoreError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.insert(Self::AUTH_TOKEN_KEY, token)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load the persisted auth token.
    ///
    /// Returns `None` if nobody is logged in.
    pub fn load_auth_token(&self) -> Result<Option<String>, CoreError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(SESSION_TABLE)?;

        Ok(table
            .get(Self::AUTH_TOKEN_KEY)?
            .map(|v| v.value().to_string()))
    }

    /// Remove the persisted auth token. Removing an absent token is a no-op.
    pub fn clear_auth_token(&self) -> Result<(), CoreError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.remove(Self::AUTH_TOKEN_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Offline Assets
    // ═══════════════════════════════════════════════════════════════════════

    fn asset_key(version: &str, path: &str) -> String {
        format!("{}{}{}", version, ASSET_KEY_SEPARATOR, path)
    }

    /// Store a batch of assets for a cache version in one transaction.
    pub fn save_assets(&self, version: &str, assets: &[(String, Vec<u8>)]) -> Result<(), CoreError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(ASSETS_TABLE)?;
            for (path, body) in assets {
                let key = Self::asset_key(version, path);
                table.insert(key.as_str(), body.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load one cached asset.
    pub fn load_asset(&self, version: &str, path: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(ASSETS_TABLE)?;
        let key = Self::asset_key(version, path);

        Ok(table.get(key.as_str())?.map(|v| v.value().to_vec()))
    }

    /// List the distinct cache versions present in the asset table.
    pub fn asset_versions(&self) -> Result<Vec<String>, CoreError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(ASSETS_TABLE)?;

        let mut versions: Vec<String> = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            if let Some((version, _)) = key.value().split_once(ASSET_KEY_SEPARATOR) {
                if !versions.iter().any(|v| v == version) {
                    versions.push(version.to_string());
                }
            }
        }
        Ok(versions)
    }

    /// Delete every asset that does not belong to `keep_version`.
    ///
    /// Returns the number of removed entries.
    pub fn purge_assets_except(&self, keep_version: &str) -> Result<usize, CoreError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(ASSETS_TABLE)?;
            let mut stale = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                let key = key.value();
                let version = key.split_once(ASSET_KEY_SEPARATOR).map(|(v, _)| v);
                if version != Some(keep_version) {
                    stale.push(key.to_string());
                }
            }
            for key in &stale {
                table.remove(key.as_str())?;
            }
            stale.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
