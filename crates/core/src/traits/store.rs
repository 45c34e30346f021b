//! Content cache trait.

use async_trait::async_trait;
use std::time::Duration;
use crate::error::Result;
use crate::types::CacheKey;

/// Key/value store with expiring entries mapping fingerprints to assessments.
///
/// Writes are unconditional overwrites; concurrent writers to the same key
/// resolve by last-write-wins.
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// Look up a previously stored assessment.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>>;

    /// Store an assessment, expiring after `ttl`.
    async fn put(&self, key: &CacheKey, assessment: &str, ttl: Duration) -> Result<()>;
}
