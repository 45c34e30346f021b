//! Builder for AnalysisOrchestrator.

use code_review_core::{
    traits::{ContentCache, ContentSource, LlmClient, RepositoryHost},
    Error, Result,
};
use std::sync::Arc;

use crate::orchestrator::{AnalysisConfig, AnalysisOrchestrator};
use crate::prompt::PromptAssembler;

/// Builder for constructing an AnalysisOrchestrator.
pub struct AnalysisBuilder {
    config: AnalysisConfig,
    host: Option<Arc<dyn RepositoryHost>>,
    content: Option<Arc<dyn ContentSource>>,
    cache: Option<Arc<dyn ContentCache>>,
    llm: Option<Arc<dyn LlmClient>>,
}

impl AnalysisBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            host: None,
            content: None,
            cache: None,
            llm: None,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repository host used for listings.
    pub fn with_host(mut self, host: Arc<dyn RepositoryHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the source of raw file content.
    pub fn with_content_source(mut self, content: Arc<dyn ContentSource>) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the assessment cache.
    pub fn with_cache(mut self, cache: Arc<dyn ContentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the LLM client.
    pub fn with_llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Build the AnalysisOrchestrator.
    pub fn build(self) -> Result<AnalysisOrchestrator> {
        let host = self.host.ok_or_else(|| Error::config("repository host not set"))?;
        let content = self
            .content
            .ok_or_else(|| Error::config("content source not set"))?;
        let cache = self.cache.ok_or_else(|| Error::config("cache not set"))?;
        let llm = self.llm.ok_or_else(|| Error::config("LLM client not set"))?;

        Ok(AnalysisOrchestrator {
            config: self.config,
            host,
            assembler: PromptAssembler::new(content),
            cache,
            llm,
        })
    }
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::new()
    }
}
