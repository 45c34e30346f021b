//! Mock implementations of core traits for testing.
//!
//! These fakes stand in for the hosting API, the content cache and the
//! completion service so the pipeline can be exercised without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    traits::{CompletionRequest, ContentCache, ContentSource, LlmClient, LlmResponse, LlmUsage, RepositoryHost},
    types::{CacheKey, FileEntry, RepositoryReference},
    Error, Result,
};

// =============================================================================
// Mock LLM Client
// =============================================================================

/// Scripted mock LLM that returns predefined responses.
pub struct MockLlm {
    responses: Mutex<Vec<String>>,
    failure: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlm {
    /// Create a new mock LLM with a queue of responses, served round-robin.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock whose every call fails with a model service error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Get the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        if let Some(ref message) = self.failure {
            return Err(Error::model_service(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        let idx = (count - 1) % responses.len().max(1);
        let content = responses.get(idx).cloned().unwrap_or_else(|| "Rating: 5/10".to_string());

        Ok(LlmResponse {
            usage: LlmUsage::estimate(&request.prompt, &content),
            content,
            finish_reason: "stop".to_string(),
        })
    }

    fn model(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// Mock Content Cache
// =============================================================================

/// In-memory cache mock that records writes and can simulate an outage.
#[derive(Default)]
pub struct MockContentCache {
    entries: Mutex<HashMap<CacheKey, String>>,
    puts: Mutex<Vec<(CacheKey, String, Duration)>>,
    unavailable: bool,
}

impl MockContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose every operation fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Seed an entry.
    pub fn with_entry(self, key: CacheKey, assessment: &str) -> Self {
        self.entries.lock().unwrap().insert(key, assessment.to_string());
        self
    }

    /// Writes received so far.
    pub fn puts(&self) -> Vec<(CacheKey, String, Duration)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentCache for MockContentCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        if self.unavailable {
            return Err(Error::storage("cache unavailable"));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, assessment: &str, ttl: Duration) -> Result<()> {
        if self.unavailable {
            return Err(Error::storage("cache unavailable"));
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.clone(), assessment.to_string(), ttl));
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), assessment.to_string());
        Ok(())
    }
}

// =============================================================================
// Mock Repository Host
// =============================================================================

/// Repository host returning a fixed listing or a fixed listing failure.
pub struct MockRepositoryHost {
    listing: Vec<FileEntry>,
    failure_status: Option<u16>,
    calls: Mutex<Vec<RepositoryReference>>,
}

impl MockRepositoryHost {
    pub fn new(listing: Vec<FileEntry>) -> Self {
        Self {
            listing,
            failure_status: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A host that answers every listing request with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            failure_status: Some(status),
            ..Self::new(Vec::new())
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RepositoryHost for MockRepositoryHost {
    async fn fetch_listing(&self, reference: &RepositoryReference) -> Result<Vec<FileEntry>> {
        self.calls.lock().unwrap().push(reference.clone());
        match self.failure_status {
            Some(status) => Err(Error::from_listing_status(status)),
            None => Ok(self.listing.clone()),
        }
    }
}

// =============================================================================
// Mock Content Source
// =============================================================================

/// Content source backed by a locator → body map. Unknown locators fail.
#[derive(Default)]
pub struct MockContentSource {
    contents: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, locator: &str, body: &str) -> Self {
        self.contents.insert(locator.to_string(), body.to_string());
        self
    }

    /// Locators requested so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn fetch_raw(&self, locator: &str) -> Result<String> {
        self.fetched.lock().unwrap().push(locator.to_string());
        self.contents.get(locator).cloned().ok_or_else(|| Error::Upstream {
            status: Some(404),
            message: format!("No content at {}", locator),
        })
    }
}

// Tests live with the consumers of these mocks
