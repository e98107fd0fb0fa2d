//! Cache Store Module
//!
//! Generic TTL store backing the weather, forecast and geocoding caches.
//! No eviction policy beyond TTL: the keyspace is bounded by rounded
//! coordinates and city-name cardinality and entries self-expire.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == TTL Cache ==
/// In-memory keyed store where every entry shares one time-to-live.
///
/// Reads apply the expiry check lazily; the background sweep task only
/// reclaims memory and is irrelevant to read correctness. Reads return
/// value copies, never live handles, so callers can never mutate an entry
/// after it has been cached.
#[derive(Debug)]
pub struct TtlCache<T> {
    /// Store name, used in logs
    name: &'static str,
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Time-to-live applied to every entry, in seconds
    ttl_seconds: u64,
    /// Performance counters
    stats: CacheStats,
}

impl<T: Clone> TtlCache<T> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `name` - Label for log lines
    /// * `ttl_seconds` - TTL applied to every entry
    pub fn new(name: &'static str, ttl_seconds: u64) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            ttl_seconds,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves a copy of the value for `key`, if present and not expired.
    ///
    /// An expired entry is removed on sight and counted as a miss: once its
    /// TTL has elapsed it is logically absent no matter when the sweep task
    /// last ran.
    pub fn get(&mut self, key: &str) -> Option<T> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                debug!(cache = self.name, key, "cache miss (expired)");
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                debug!(cache = self.name, key, "cache hit");
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                debug!(cache = self.name, key, "cache miss");
                None
            }
        }
    }

    // == Set ==
    /// Inserts or replaces the value for `key`, resetting its TTL clock.
    ///
    /// Writes are whole-value replacements; entries are never patched in
    /// place.
    pub fn set(&mut self, key: String, value: T) {
        let entry = CacheEntry::new(value, self.ttl_seconds);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Sweep Expired ==
    /// Physically removes all expired entries, returning how many were
    /// reclaimed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.record_expirations(count as u64);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the store's counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
