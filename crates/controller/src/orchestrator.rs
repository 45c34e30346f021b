//! Analysis orchestration: cache lookup, listing fetch, prompt, completion.

use std::sync::Arc;
use std::time::Duration;

use code_review_core::{
    traits::{CompletionRequest, ContentCache, LlmClient, RepositoryHost},
    types::{AnalysisRequest, CacheKey, CacheKeyPolicy, CandidateLevel, RepositoryReference},
    Error, Result,
};

use code_review_governance::{track_cache_lookup, track_tokens};

use crate::builder::AnalysisBuilder;
use crate::fingerprint::{fingerprint_request, request_fingerprint};
use crate::prompt::PromptAssembler;

/// Tunables for the completion call and the cache.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Output token budget.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Retention window for cached assessments.
    pub ttl: Duration,
    /// Inputs the cache key is derived from.
    pub key_policy: CacheKeyPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.5,
            ttl: Duration::from_secs(24 * 60 * 60),
            key_policy: CacheKeyPolicy::Request,
        }
    }
}

/// Composes fetcher, prompt assembler, cache and completion service.
///
/// Performs no retries. Cache failures degrade to a miss; everything else
/// is surfaced to the caller.
pub struct AnalysisOrchestrator {
    pub(crate) config: AnalysisConfig,
    pub(crate) host: Arc<dyn RepositoryHost>,
    pub(crate) assembler: PromptAssembler,
    pub(crate) cache: Arc<dyn ContentCache>,
    pub(crate) llm: Arc<dyn LlmClient>,
}

impl AnalysisOrchestrator {
    /// Create a builder.
    pub fn builder() -> AnalysisBuilder {
        AnalysisBuilder::new()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a repository given its URL.
    pub async fn analyze_url(
        &self,
        repository_url: &str,
        description: &str,
        level: CandidateLevel,
    ) -> Result<String> {
        let reference = RepositoryReference::parse(repository_url)?;
        self.analyze(&reference, description, level).await
    }

    /// Produce (or replay) the assessment for a repository.
    pub async fn analyze(
        &self,
        reference: &RepositoryReference,
        description: &str,
        level: CandidateLevel,
    ) -> Result<String> {
        tracing::info!(
            repository = %reference,
            level = %level,
            policy = ?self.config.key_policy,
            "Received review request"
        );

        let (key, request) = match self.config.key_policy {
            CacheKeyPolicy::Request => {
                let key = request_fingerprint(reference, description, level);
                if let Some(cached) = self.cache_lookup(&key).await {
                    return Ok(cached);
                }
                let request = self.fetch_request(reference, description, level).await?;
                (key, request)
            }
            CacheKeyPolicy::Listing => {
                let request = self.fetch_request(reference, description, level).await?;
                let key = fingerprint_request(&request);
                if let Some(cached) = self.cache_lookup(&key).await {
                    return Ok(cached);
                }
                (key, request)
            }
        };

        let assessment = self.compute(&request).await?;
        self.cache_store(&key, &assessment).await;

        tracing::info!(repository = %reference, "Analysis completed");
        Ok(assessment)
    }

    async fn fetch_request(
        &self,
        reference: &RepositoryReference,
        description: &str,
        level: CandidateLevel,
    ) -> Result<AnalysisRequest> {
        let listing = self.host.fetch_listing(reference).await.map_err(|e| {
            tracing::error!(repository = %reference, error = %e, "Listing fetch failed");
            e
        })?;

        Ok(AnalysisRequest {
            description: description.to_string(),
            level,
            listing,
        })
    }

    /// Build the prompt and call the completion service.
    async fn compute(&self, request: &AnalysisRequest) -> Result<String> {
        let prompt = self
            .assembler
            .build_prompt(&request.listing, &request.description, request.level)
            .await;

        let completion = CompletionRequest {
            prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self.llm.complete(&completion).await.map_err(|e| {
            tracing::error!(model = %self.llm.model(), error = %e, "Completion failed");
            match e {
                Error::ModelService(message) => Error::ModelService(message),
                other => Error::model_service(other.to_string()),
            }
        })?;

        track_tokens(
            self.llm.model(),
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
        );

        Ok(response.content.trim().to_string())
    }

    async fn cache_lookup(&self, key: &CacheKey) -> Option<String> {
        match self.cache.get(key).await {
            Ok(Some(hit)) => {
                track_cache_lookup("hit");
                tracing::info!(key = %key, "Cache hit");
                Some(hit)
            }
            Ok(None) => {
                track_cache_lookup("miss");
                tracing::debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                track_cache_lookup("error");
                tracing::warn!(key = %key, error = %e, "Cache unavailable, computing");
                None
            }
        }
    }

    async fn cache_store(&self, key: &CacheKey, assessment: &str) {
        match self.cache.put(key, assessment, self.config.ttl).await {
            Ok(()) => tracing::info!(key = %key, "Analysis result cached"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to cache analysis result"),
        }
    }
}
