//! Bounded, time-limited cache of full search results.
//!
//! Entries are keyed by [`SearchKey`] and hold the complete, unpaginated
//! result list so that "load more" can slice further pages without
//! re-planning. Eviction is FIFO by insertion; expiry is checked lazily on
//! read.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::query::{PlannedResults, SearchKey};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Search cache entry
#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub results: PlannedResults,
    pub total: usize,
    /// When this entry was written
    pub timestamp: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<SearchKey, CachedSearch>,
    // front = oldest insertion, back = newest
    order: VecDeque<SearchKey>,
}

impl Inner {
    fn remove(&mut self, key: &SearchKey) {
        self.entries.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}

/// Shared cache; all methods take `&self` and never hold the lock across
/// an await point.
#[derive(Debug)]
pub struct SearchCache {
    ttl: Duration,
    capacity: usize,
    inner: Mutex<Inner>,
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }
}

impl SearchCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the entry while it is younger than the TTL. Expired entries
    /// are dropped on the way out.
    pub fn get(&self, key: &SearchKey) -> Option<CachedSearch> {
        let mut inner = self.inner.lock();
        let fresh = inner
            .entries
            .get(key)
            .map(|entry| entry.timestamp.elapsed() < self.ttl)?;

        if fresh {
            inner.entries.get(key).cloned()
        } else {
            debug!("cache entry expired for {}", key);
            inner.remove(key);
            None
        }
    }

    /// Inserts or overwrites. Overwriting refreshes the timestamp and moves
    /// the key to the back of the eviction queue.
    pub fn set(&self, key: SearchKey, results: PlannedResults) {
        let mut inner = self.inner.lock();

        if inner.entries.contains_key(&key) {
            inner.remove(&key);
        } else {
            while inner.entries.len() >= self.capacity {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                debug!("evicting oldest cache entry {}", oldest);
                inner.entries.remove(&oldest);
            }
        }

        let total = results.total();
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            CachedSearch {
                results,
                total,
                timestamp: Instant::now(),
            },
        );
    }

    /// Drops every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let ttl = self.ttl;
        let expired: Vec<SearchKey> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.timestamp.elapsed() >= ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            inner.remove(key);
        }
        expired.len()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
