//! In-memory content cache using DashMap.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use code_review_core::{traits::ContentCache, types::CacheKey, Result};

/// Cached assessment with expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Assessment text.
    assessment: String,
    /// When the entry was created.
    created_at: Instant,
    /// Time-to-live.
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// Process-local content cache.
///
/// Expired entries are ignored on read and dropped by `cleanup`.
#[derive(Debug, Default)]
pub struct InMemoryContentCache {
    entries: DashMap<CacheKey, CacheEntry>,
}

impl InMemoryContentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries.
    pub fn cleanup(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    /// Run `cleanup` every `period` until the cache is dropped.
    pub fn spawn_cleanup(self: &Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let before = cache.len();
                cache.cleanup();
                let evicted = before.saturating_sub(cache.len());
                if evicted > 0 {
                    tracing::debug!(evicted, remaining = cache.len(), "Swept expired assessments");
                }
            }
        })
    }
}

#[async_trait]
impl ContentCache for InMemoryContentCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let hit = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.assessment.clone());

        if hit.is_none() {
            // Expired entries are evicted lazily
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }

        Ok(hit)
    }

    async fn put(&self, key: &CacheKey, assessment: &str, ttl: Duration) -> Result<()> {
        tracing::debug!(key = %key, ttl_secs = ttl.as_secs(), "Caching assessment in memory");

        self.entries.insert(
            key.clone(),
            CacheEntry {
                assessment: assessment.to_string(),
                created_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }
}
