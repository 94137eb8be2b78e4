//! Offline asset cache.
//!
//! A fixed manifest of asset paths is fetched once and stored under a cache
//! version. When the network fails later, requests are answered from the
//! cache, and navigations with no cached copy get the offline page.
//!
//! Lifecycle:
//! 1. `precache`: fetch every manifest entry; all-or-nothing
//! 2. `activate`: drop entries from other cache versions
//! 3. `respond`: network first, cache second, offline page for navigations

use std::future::Future;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::storage::Storage;

/// Version tag for the current manifest. Bump to invalidate old entries.
pub const CACHE_VERSION: &str = "coinpulse-cache-v1";

/// Page served for navigations that cannot be answered.
pub const OFFLINE_PAGE: &str = "/offline.html";

/// Every asset needed to render the offline fallback without network.
pub const OFFLINE_ASSETS: &[&str] = &[
    OFFLINE_PAGE,
    "/",
    "/index.html",
    "/static/js/bundle.js",
    "/static/css/main.css",
    "/offline/Game/offlineGame.css",
];

/// Anything that can fetch an asset body by path.
pub trait AssetSource: Send + Sync {
    fn fetch_asset(&self, path: &str) -> impl Future<Output = CoreResult<Vec<u8>>> + Send;
}

/// Fetches assets over HTTP from a fixed origin.
#[derive(Clone)]
pub struct HttpAssetSource {
    http: reqwest::Client,
    origin: String,
}

impl HttpAssetSource {
    pub fn new(http: reqwest::Client, origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            http,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch_asset(&self, path: &str) -> impl Future<Output = CoreResult<Vec<u8>>> + Send {
        let url = format!("{}{}", self.origin, path);
        async move {
            let response = self.http.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(CoreError::Asset(format!("{} returned {}", url, response.status())));
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}

/// Versioned asset cache backed by [`Storage`].
#[derive(Clone)]
pub struct OfflineCache {
    storage: Storage,
    version: String,
}

impl OfflineCache {
    pub fn new(storage: Storage) -> Self {
        Self::with_version(storage, CACHE_VERSION)
    }

    pub fn with_version(storage: Storage, version: impl Into<String>) -> Self {
        Self {
            storage,
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fetch and store every manifest entry.
    ///
    /// Nothing is written unless all entries were fetched.
    pub async fn precache<S: AssetSource>(&self, source: &S) -> CoreResult<usize> {
        let mut fetched = Vec::with_capacity(OFFLINE_ASSETS.len());
        for path in OFFLINE_ASSETS {
            let body = source.fetch_asset(path).await.map_err(|e| {
                warn!(path, error = %e, "Precache failed");
                CoreError::Asset(format!("{}: {}", path, e))
            })?;
            debug!(path, bytes = body.len(), "Fetched offline asset");
            fetched.push((path.to_string(), body));
        }

        self.storage.save_assets(&self.version, &fetched)?;
        info!(count = fetched.len(), version = %self.version, "Offline assets cached");
        Ok(fetched.len())
    }

    /// Remove entries that belong to any other cache version.
    pub fn activate(&self) -> CoreResult<usize> {
        let removed = self.storage.purge_assets_except(&self.version)?;
        if removed > 0 {
            info!(removed, "Removed stale offline assets");
        }
        Ok(removed)
    }

    pub fn cached(&self, path: &str) -> CoreResult<Option<Vec<u8>>> {
        self.storage.load_asset(&self.version, path)
    }

    /// Whether every manifest entry is present.
    pub fn is_complete(&self) -> CoreResult<bool> {
        for path in OFFLINE_ASSETS {
            if self.cached(path)?.is_none() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Answer a request: the network result if it succeeded, otherwise the
    /// cached copy, otherwise the offline page for navigations.
    pub fn respond(
        &self,
        path: &str,
        is_navigation: bool,
        network: CoreResult<Vec<u8>>,
    ) -> CoreResult<Option<Vec<u8>>> {
        let err = match network {
            Ok(body) => return Ok(Some(body)),
            Err(e) => e,
        };
        debug!(path, error = %err, "Network failed, trying offline cache");

        if let Some(body) = self.cached(path)? {
            return Ok(Some(body));
        }
        if is_navigation {
            return self.cached(OFFLINE_PAGE);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct MapSource {
        missing: Option<&'static str>,
    }

    impl AssetSource for MapSource {
        fn fetch_asset(&self, path: &str) -> impl Future<Output = CoreResult<Vec<u8>>> + Send {
            let result = if Some(path) == self.missing {
                Err(CoreError::Asset("404".to_string()))
            } else {
                Ok(format!("body of {}", path).into_bytes())
            };
            std::future::ready(result)
        }
    }

    fn create_cache() -> (OfflineCache, Storage, TempDir) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("cache.redb")).unwrap();
        (OfflineCache::new(storage.clone()), storage, temp)
    }

    fn offline() -> CoreResult<Vec<u8>> {
        Err(CoreError::Asset("network down".to_string()))
    }

    #[test]
    fn test_manifest_contents() {
        assert_eq!(OFFLINE_ASSETS.len(), 6);
        assert!(OFFLINE_ASSETS.contains(&OFFLINE_PAGE));
        assert!(OFFLINE_ASSETS.contains(&"/offline/Game/offlineGame.css"));
    }

    #[tokio::test]
    async fn test_precache_stores_every_asset() {
        let (cache, _storage, _temp) = create_cache();
        assert!(!cache.is_complete().unwrap());

        let count = cache.precache(&MapSource { missing: None }).await.unwrap();
        assert_eq!(count, OFFLINE_ASSETS.len());
        assert!(cache.is_complete().unwrap());
        assert_eq!(
            cache.cached("/static/css/main.css").unwrap().unwrap(),
            b"body of /static/css/main.css"
        );
    }

    #[tokio::test]
    async fn test_precache_is_all_or_nothing() {
        let (cache, _storage, _temp) = create_cache();

        let result = cache
            .precache(&MapSource {
                missing: Some("/static/js/bundle.js"),
            })
            .await;
        assert!(matches!(result, Err(CoreError::Asset(_))));
        assert!(cache.cached(OFFLINE_PAGE).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_respond_prefers_network_then_cache_then_offline_page() {
        let (cache, _storage, _temp) = create_cache();
        cache.precache(&MapSource { missing: None }).await.unwrap();

        let fresh = cache.respond("/", true, Ok(b"fresh".to_vec())).unwrap();
        assert_eq!(fresh.unwrap(), b"fresh");

        let cached = cache.respond("/", true, offline()).unwrap();
        assert_eq!(cached.unwrap(), b"body of /");

        let fallback = cache.respond("/dashboard", true, offline()).unwrap();
        assert_eq!(fallback.unwrap(), b"body of /offline.html");

        let nothing = cache.respond("/api/data.json", false, offline()).unwrap();
        assert!(nothing.is_none());
    }

    #[tokio::test]
    async fn test_activate_drops_old_versions() {
        let (cache, storage, _temp) = create_cache();
        let old = OfflineCache::with_version(storage.clone(), "coinpulse-cache-v0");
        old.precache(&MapSource { missing: None }).await.unwrap();
        cache.precache(&MapSource { missing: None }).await.unwrap();

        let removed = cache.activate().unwrap();
        assert_eq!(removed, OFFLINE_ASSETS.len());
        assert!(old.cached(OFFLINE_PAGE).unwrap().is_none());
        assert!(cache.is_complete().unwrap());
        assert_eq!(storage.asset_versions().unwrap(), vec![CACHE_VERSION.to_string()]);
    }
}
