// In-memory cache store.
// Holds entries with their insertion time and evicts them once the TTL has passed.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Default TTL for repository metadata and README entries: 30 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this cached data has expired based on TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= ttl
    }

    /// Check if this cached data is still valid (not expired).
    pub fn is_valid(&self, ttl: Duration) -> bool {
        !self.is_expired(ttl)
    }
}

/// Process-wide key/value cache with a fixed time-to-live per entry.
///
/// Writers race freely: the last insert for a key wins. Reads hand out clones
/// so callers never hold the lock across an await point.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, CachedData<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a clone of the live entry for `key`, evicting it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(cached) if cached.is_valid(self.ttl) => return Some(cached.data.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write();
        // Another writer may have refreshed the entry between the two locks.
        if entries.get(key).is_some_and(|c| c.is_expired(self.ttl)) {
            entries.remove(key);
        }
        entries
            .get(key)
            .filter(|c| c.is_valid(self.ttl))
            .map(|c| c.data.clone())
    }

    /// Whether a live entry exists for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite an entry, resetting its TTL.
    pub fn insert(&self, key: K, value: V) {
        self.entries.write().insert(key, CachedData::new(value));
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().remove(key).map(|c| c.data)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, cached| cached.is_valid(self.ttl));
        before - entries.len()
    }

    /// Number of stored entries, including any not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &K, by: chrono::Duration) {
        if let Some(cached) = self.entries.write().get_mut(key) {
            cached.cached_at -= by;
        }
    }
}
