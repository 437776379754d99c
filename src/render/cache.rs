//! Response cache for the static engine
//!
//! Responses are kept in memory for the run and, when a directory is
//! configured, mirrored to disk as one JSON file per URL so a later run can
//! reuse them until they expire.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

/// A fetched page as stored in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// URL that was requested
    pub url: Url,

    /// URL the response came from, after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Creates a new entry stamped with the current time
    pub fn new(url: Url, final_url: Url, status: u16, body: String) -> Self {
        Self {
            url,
            final_url,
            status,
            body,
            fetched_at: Utc::now(),
        }
    }

    /// Returns how long ago the page was fetched
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.fetched_at
    }

    /// Checks if the entry is older than `expiration`
    ///
    /// Entries stamped in the future (clock changes) count as fresh.
    pub fn is_stale(&self, expiration: Duration) -> bool {
        self.age()
            .to_std()
            .map(|age| age > expiration)
            .unwrap_or(false)
    }
}

/// URL-keyed response cache with expiry
#[derive(Debug)]
pub struct ResponseCache {
    expiration: Duration,
    directory: Option<PathBuf>,
    entries: HashMap<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new(expiration: Duration, directory: Option<PathBuf>) -> Self {
        Self {
            expiration,
            directory,
            entries: HashMap::new(),
        }
    }

    /// Returns a fresh entry for `url`, checking memory first and then disk.
    ///
    /// Stale entries are dropped. Disk faults are logged and treated as a
    /// miss.
    pub fn get(&mut self, url: &Url) -> Option<CachedResponse> {
        if let Some(entry) = self.entries.get(url.as_str()) {
            if !entry.is_stale(self.expiration) {
                return Some(entry.clone());
            }
            tracing::debug!("Cache entry for {} expired", url);
            self.entries.remove(url.as_str());
        }

        let entry = self.read_from_disk(url)?;
        if entry.is_stale(self.expiration) {
            tracing::debug!("Disk cache entry for {} expired", url);
            return None;
        }

        self.entries.insert(url.as_str().to_string(), entry.clone());
        Some(entry)
    }

    /// Stores a response in memory and, if configured, on disk
    pub fn put(&mut self, response: CachedResponse) {
        self.write_to_disk(&response);
        self.entries
            .insert(response.url.as_str().to_string(), response);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File holding the entry for `url`: `<directory>/<sha256(url)>.json`
    pub fn entry_path(&self, url: &Url) -> Option<PathBuf> {
        let directory = self.directory.as_ref()?;
        let digest = Sha256::digest(url.as_str().as_bytes());
        Some(directory.join(format!("{}.json", hex::encode(digest))))
    }

    fn read_from_disk(&self, url: &Url) -> Option<CachedResponse> {
        let path = self.entry_path(url)?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_to_disk(&self, response: &CachedResponse) {
        let Some(path) = self.entry_path(&response.url) else {
            return;
        };

        let result = path
            .parent()
            .map(std::fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_vec(response)?;
                std::fs::write(&path, json)
            });

        if let Err(e) = result {
            tracing::warn!("Failed to write cache entry {}: {}", path.display(), e);
        }
    }
}
