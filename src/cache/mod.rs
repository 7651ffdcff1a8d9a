//! In-memory TTL cache for content queries
//!
//! Query results are memoized under string keys built from a cache type and
//! the call arguments. Expired entries are treated as absent on read, so the
//! background sweeper is an optimization, not a correctness requirement.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Default entry lifetime when no TTL is given
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Build a cache key from a cache type and positional arguments
///
/// Keys are positional: `cache_key("posts-by-column", &["tech", "go"])` and
/// `cache_key("posts-by-column", &["go", "tech"])` are distinct.
pub fn cache_key(cache_type: &str, args: &[&str]) -> String {
    let mut key = String::from(cache_type);
    for arg in args {
        key.push(':');
        key.push_str(arg);
    }
    key
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A keyed memoization store with per-entry expiry
///
/// The internal mutex guards map integrity only; callers compute values
/// outside the lock and insert afterwards. A failed computation stores
/// nothing.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    default_ttl: Duration,
}

/// Snapshot of cache contents for diagnostics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the standard 5 minute default TTL
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom default TTL
    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Look up a key, treating expired entries as absent
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                tracing::debug!("cache hit: {}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
            tracing::debug!("cache expired: {}", key);
        }
        None
    }

    /// Store a value under a key, expiring after `ttl` (or the default)
    pub fn insert(&self, key: String, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        tracing::debug!("cache store: {}", key);
        entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Remove every entry whose key was built from `cache_type`
    pub fn invalidate_type(&self, cache_type: &str) {
        let prefix = format!("{}:", cache_type);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|key, _| key != cache_type && !key.starts_with(&prefix));
        tracing::debug!(
            "cache invalidated {} entries for type: {}",
            before - entries.len(),
            cache_type
        );
    }

    /// Remove every entry regardless of type
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// Remove entries past their expiry, returning how many were dropped
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!("cache sweep removed {} expired entries", swept);
        }
        swept
    }

    /// Current size and key set
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            size: entries.len(),
            keys: entries.keys().cloned().collect(),
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for a background sweeper thread; stops the thread on drop
pub struct SweeperHandle {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawn a housekeeping thread that sweeps expired entries periodically
///
/// The sweeper only removes entries; reads and writes proceed under the
/// ordinary map lock.
pub fn spawn_sweeper<V: Clone + Send + 'static>(
    cache: Arc<TtlCache<V>>,
    interval: Duration,
) -> SweeperHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();
    let handle = std::thread::spawn(move || {
        // Poll in short steps so drop does not wait out a long interval
        let step = Duration::from_millis(50).min(interval);
        let mut next_sweep = Instant::now() + interval;
        while !stop_flag.load(Ordering::Relaxed) {
            std::thread::sleep(step);
            if Instant::now() >= next_sweep {
                cache.sweep_expired();
                next_sweep = Instant::now() + interval;
            }
        }
    });
    SweeperHandle {
        stop,
        handle: Some(handle),
    }
}
