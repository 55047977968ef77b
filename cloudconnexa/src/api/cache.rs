//! Short-lived cache of GET response bodies, keyed by full URL
//!
//! Every entry carries the write generation that was current when its
//! request went out. A write bumps the generation, so a read that raced a
//! write can never be served afterwards, even if it lands in the cache
//! after the write completed.

use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Upper bound on cached bodies; least recently used go first.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;

pub struct ResponseCache {
    entries: Option<Cache<String, (u64, String)>>,
    generation: AtomicU64,
}

impl ResponseCache {
    /// `None` or a zero TTL disables caching.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self::with_capacity(ttl, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(ttl: Option<Duration>, capacity: u64) -> Self {
        let entries = ttl.filter(|ttl| !ttl.is_zero()).map(|ttl| {
            Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build()
        });

        Self {
            entries,
            generation: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Generation to stamp on a read that is about to be sent.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn get(&self, url: &str) -> Option<String> {
        let entries = self.entries.as_ref()?;
        let (generation, body) = entries.get(url).await?;
        if generation == self.generation() {
            Some(body)
        } else {
            entries.invalidate(url).await;
            None
        }
    }

    /// Store a body fetched under `generation`. Dropped if a write has
    /// happened since.
    pub async fn insert(&self, url: String, body: String, generation: u64) {
        let Some(entries) = &self.entries else {
            return;
        };
        if generation != self.generation() {
            tracing::debug!("Discarding response for {} fetched before a write", url);
            return;
        }
        entries.insert(url, (generation, body)).await;
    }

    /// Forget everything cached so far, including reads still in flight.
    pub fn invalidate(&self) {
        let Some(entries) = &self.entries else {
            return;
        };
        self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::debug!("Invalidating {} cached responses", entries.entry_count());
        entries.invalidate_all();
    }

    /// Cached entries after pending evictions have been applied.
    pub async fn len(&self) -> u64 {
        match &self.entries {
            Some(entries) => {
                entries.run_pending_tasks().await;
                entries.entry_count()
            }
            None => 0,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
