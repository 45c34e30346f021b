#![deny(unused)]
//! Content cache backends for the code review service.
//!
//! Two interchangeable `ContentCache` implementations: a process-local
//! DashMap cache and a shared Redis cache. Both honour per-entry TTLs.

pub mod memory;
pub mod redis;

pub use memory::InMemoryContentCache;
pub use redis::RedisContentCache;

/// Default retention window for cached assessments (24 hours).
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Sweep period for expired in-memory entries.
pub const CLEANUP_INTERVAL_SECS: u64 = 5 * 60;
