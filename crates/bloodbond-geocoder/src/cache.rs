//! Time-bounded memo of geocoding outcomes.
//!
//! Hospital locations rarely change, so repeated rankings otherwise re-resolve
//! the same strings on every request. Entries are keyed by the normalised
//! query and hold both hits and confirmed misses. Provider errors are never
//! stored.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use bloodbond_core::GeoCoordinate;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct CachedLookup {
    outcome: Option<GeoCoordinate>,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct GeocodeCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedLookup>>,
}

impl GeocodeCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `None` when `ttl_secs` is zero (caching disabled).
    #[must_use]
    pub fn from_ttl_secs(ttl_secs: u64) -> Option<Self> {
        (ttl_secs > 0).then(|| Self::new(Duration::from_secs(ttl_secs)))
    }

    /// Looks up a previous outcome.
    ///
    /// `Some(Some(coord))` is a cached hit, `Some(None)` a cached "no match",
    /// and `None` means the query must go to the provider.
    pub fn get(&self, query: &str) -> Option<Option<GeoCoordinate>> {
        let key = normalize_query(query);
        let mut entries = self.lock();
        let lookup = entries
            .get(&key)
            .map(|entry| (entry.stored_at.elapsed() < self.ttl, entry.outcome));
        match lookup {
            Some((true, outcome)) => Some(outcome),
            Some((false, _)) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Stores an outcome and drops every entry whose TTL has lapsed, so keys
    /// that are never read again do not accumulate.
    pub fn insert(&self, query: &str, outcome: Option<GeoCoordinate>) {
        let key = normalize_query(query);
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CachedLookup {
                outcome,
                stored_at: Instant::now(),
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedLookup>> {
        // A poisoned map only means another thread panicked mid-insert; the
        // data is still a valid HashMap.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Lowercases, trims and collapses inner whitespace so trivially different
/// spellings of the same place share an entry.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
