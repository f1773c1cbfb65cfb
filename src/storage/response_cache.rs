//! Disk-backed response cache
//!
//! Every successfully fetched payload is stored as JSON under
//! `<root>/<sha256(url)>.json` and served from disk on later lookups, including
//! after restarts and across process runs. Entries never expire.

use crate::crawler::{FetchOutcome, Fetcher};
use crate::CatalogError;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};

/// Cache counters for one process run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from disk
    pub hits: u64,
    /// Lookups that went to the network
    pub misses: u64,
    /// Payloads persisted
    pub writes: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Content-addressed store of decoded payloads in front of a `Fetcher`
#[derive(Debug)]
pub struct ResponseCache {
    root: PathBuf,
    fetcher: Fetcher,
    stats: CacheStats,
}

/// Derives the cache key for a URL (hex-encoded SHA-256)
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

impl ResponseCache {
    /// Opens a cache rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>, fetcher: Fetcher) -> Result<Self, CatalogError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| CatalogError::CacheIo {
            path: root.clone(),
            source,
        })?;

        Ok(Self {
            root,
            fetcher,
            stats: CacheStats::default(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// File holding the cached payload for a URL
    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.root.join(format!("{}.json", cache_key(url)))
    }

    /// Reads a cached payload
    ///
    /// Missing, unreadable and corrupt entries are all reported as `None`; the
    /// latter two are logged so they get refetched rather than trusted.
    pub fn load(&self, url: &str) -> Option<Vec<Value>> {
        let path = self.entry_path(url);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable cache entry");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt cache entry");
                None
            }
        }
    }

    /// Persists a payload for a URL
    ///
    /// The entry is written to a temporary file and renamed into place so an
    /// interrupted write never leaves a truncated entry behind.
    pub fn store(&mut self, url: &str, payload: &[Value]) -> Result<(), CatalogError> {
        let path = self.entry_path(url);
        let tmp_path = path.with_extension("json.tmp");
        let io_err = |path: &Path, source: io::Error| CatalogError::CacheIo {
            path: path.to_path_buf(),
            source,
        };

        let bytes = serde_json::to_vec(payload).map_err(|e| io_err(&path, io::Error::from(e)))?;
        std::fs::write(&tmp_path, bytes).map_err(|e| io_err(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| io_err(&path, e))?;

        self.stats.writes += 1;
        Ok(())
    }

    /// Returns the cached payload for a URL, fetching and persisting on a miss
    ///
    /// Failed fetches are passed through untouched and never persisted, so the
    /// URL is fetched again on the next attempt.
    ///
    /// # Returns
    ///
    /// * `Ok(FetchOutcome)` - Cached or fetched payload, or the fetch failure
    /// * `Err(CatalogError::CacheIo)` - A fetched payload could not be persisted
    pub async fn get_or_fetch(&mut self, url: &str) -> Result<FetchOutcome, CatalogError> {
        if let Some(payload) = self.load(url) {
            self.stats.hits += 1;
            tracing::trace!(url, "Cache hit");
            return Ok(FetchOutcome::Payload(payload));
        }

        self.stats.misses += 1;
        let outcome = self.fetcher.fetch_json(url).await;
        if let FetchOutcome::Payload(payload) = &outcome {
            self.store(url, payload)?;
        }
        Ok(outcome)
    }
}
