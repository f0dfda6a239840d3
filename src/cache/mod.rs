use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AppResult;

/// Builds a deterministic cache key from a prefix and serializable parameters.
///
/// Parameters go through `serde_json::Value`, whose objects keep their keys
/// sorted, so the same logical query always yields the same key.
pub fn generate_key<P: Serialize + ?Sized>(prefix: &str, params: &P) -> AppResult<String> {
    let value = serde_json::to_value(params)?;
    Ok(format!("{}:{}", prefix, value))
}

struct CacheEntry<V> {
    value: V,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Entry counts reported by `ResultCache::stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
}

/// In-process key/value cache with per-entry expiry.
///
/// Expired entries are invisible to `get` and removed the first time a
/// lookup notices them, or in bulk by `cleanup`. There is no size bound:
/// TTL is the only eviction policy.
pub struct ResultCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Stores a value under the default TTL
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores a value with an explicit TTL; a zero TTL is expired on arrival
    /// and a TTL too large to represent never expires
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries
            .lock()
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Returns a copy of the value if present and not yet expired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }

        entries.remove(key);
        tracing::trace!(key, "Evicted expired cache entry on read");
        None
    }

    /// Removes a key, returning whether it was present
    pub fn delete(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Drops every expired entry and returns how many were removed
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.lock();
        let active = entries.values().filter(|e| e.is_live(now)).count();

        CacheStats {
            total: entries.len(),
            active,
            expired: entries.len() - active,
        }
    }
}

/// Handle for stopping the periodic cleanup task
pub struct CleanupHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Signals the cleanup task to stop and waits for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Cache cleanup task panicked");
        }
        tracing::info!("Cache cleanup task stopped");
    }
}

/// Spawns a background task that sweeps expired entries every `every`
pub fn spawn_cleanup_task<V>(cache: Arc<ResultCache<V>>, every: Duration) -> CleanupHandle
where
    V: Clone + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        tracing::info!(interval_secs = every.as_secs(), "Cache cleanup task started");
        let mut ticker = tokio::time::interval(every);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.cleanup();
                    if removed > 0 {
                        tracing::debug!(removed, "Removed expired cache entries");
                    }
                }
                _ = shutdown_rx.recv() => break,
            }
        }
    });

    CleanupHandle { shutdown_tx, task }
}
