//! Generic entity cache view
//!
//! A concurrent map from snowflake ID to cached entity. DashMap gives
//! per-bucket atomicity, the unit of consistency for this layer: reads may
//! be stale relative to the remote service, writes are never torn.
//! Inserts are last-write-wins.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use relay_core::Snowflake;

/// Concurrent ID-keyed view over one entity kind
#[derive(Debug)]
pub struct CacheView<V: Clone> {
    inner: DashMap<Snowflake, V>,
    writes: AtomicU64,
}

impl<V: Clone> CacheView<V> {
    /// Create an empty view
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
            writes: AtomicU64::new(0),
        }
    }

    /// Look up an entity by ID, cloning it out of the cache
    pub fn get(&self, id: Snowflake) -> Option<V> {
        self.inner.get(&id).map(|entry| entry.clone())
    }

    /// Insert or replace an entity, returning the previous value
    pub fn insert(&self, id: Snowflake, value: V) -> Option<V> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.inner.insert(id, value)
    }

    /// Remove an entity by ID
    pub fn remove(&self, id: Snowflake) -> Option<V> {
        self.inner.remove(&id).map(|(_, value)| value)
    }

    /// Check whether an ID is cached
    pub fn contains(&self, id: Snowflake) -> bool {
        self.inner.contains_key(&id)
    }

    /// Number of cached entities
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of inserts performed on this view
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Remove all cached entities
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl<V: Clone> Default for CacheView<V> {
    fn default() -> Self {
        Self::new()
    }
}
