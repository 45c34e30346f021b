//! Repository hosting traits.

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{FileEntry, RepositoryReference};

/// Source of repository listings.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Fetch the complete top-level listing of a repository.
    ///
    /// Fails with `NotFound`, `AccessDenied` or `Upstream`.
    async fn fetch_listing(&self, reference: &RepositoryReference) -> Result<Vec<FileEntry>>;
}

/// Raw file content retrieval.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the raw text behind a content locator.
    async fn fetch_raw(&self, locator: &str) -> Result<String>;
}
