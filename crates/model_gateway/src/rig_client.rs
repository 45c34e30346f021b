//! Rig LLM client adapter.
//!
//! Wraps Rig's provider agents for integration with our LlmClient trait.

use async_trait::async_trait;
use std::time::Duration;

use code_review_core::{
    traits::{CompletionRequest, LlmClient, LlmResponse, LlmUsage},
    Error, Result,
};

// Import required Rig traits
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;

/// Provider type for Rig clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigProvider {
    OpenAI,
    Anthropic,
}

impl RigProvider {
    /// Resolve a provider from its configured name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(Error::config(format!("Unsupported model provider: {}", other))),
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Configuration for Rig client.
#[derive(Debug, Clone)]
pub struct RigConfig {
    /// Provider to use.
    pub provider: RigProvider,
    /// Model name.
    pub model: String,
    /// System prompt.
    pub system_prompt: Option<String>,
    /// Per-call timeout.
    pub timeout: Duration,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: "gpt-4-turbo".to_string(),
            system_prompt: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl RigConfig {
    /// Create config for OpenAI.
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::OpenAI,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for Anthropic.
    pub fn anthropic(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::Anthropic,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Rig-based LLM client.
///
/// Provider clients are built per call from the environment so a missing key
/// surfaces as a model service error on the request, not at startup.
pub struct RigLlmClient {
    config: RigConfig,
}

impl RigLlmClient {
    /// Create a new Rig client with the given configuration.
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    /// Whether the provider's API key is present in the environment.
    pub fn has_api_key(&self) -> bool {
        std::env::var(self.config.provider.api_key_var()).is_ok()
    }

    /// Call OpenAI via Rig.
    async fn call_openai(&self, request: &CompletionRequest) -> Result<String> {
        use rig::providers::openai;

        let client = openai::Client::from_env();

        let mut agent_builder = client
            .agent(&self.config.model)
            .temperature(request.temperature as f64)
            .max_tokens(request.max_tokens as u64);

        if let Some(ref system) = self.config.system_prompt {
            agent_builder = agent_builder.preamble(system);
        }

        let agent = agent_builder.build();

        agent
            .prompt(request.prompt.as_str())
            .await
            .map_err(|e| Error::model_service(format!("OpenAI error: {}", e)))
    }

    /// Call Anthropic via Rig.
    async fn call_anthropic(&self, request: &CompletionRequest) -> Result<String> {
        use rig::providers::anthropic;

        let client = anthropic::Client::from_env();

        let mut agent_builder = client
            .agent(&self.config.model)
            .temperature(request.temperature as f64)
            .max_tokens(request.max_tokens as u64);

        if let Some(ref system) = self.config.system_prompt {
            agent_builder = agent_builder.preamble(system);
        }

        let agent = agent_builder.build();

        agent
            .prompt(request.prompt.as_str())
            .await
            .map_err(|e| Error::model_service(format!("Anthropic error: {}", e)))
    }
}

/// Run a provider call under `timeout`; expiry is a model service error.
async fn with_deadline<F>(timeout: Duration, call: F) -> Result<String>
where
    F: std::future::Future<Output = Result<String>>,
{
    tokio::time::timeout(timeout, call).await.map_err(|_| {
        Error::model_service(format!(
            "Completion timed out after {}ms",
            timeout.as_millis()
        ))
    })?
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse> {
        // from_env panics on a missing key
        let key_var = self.config.provider.api_key_var();
        if !self.has_api_key() {
            return Err(Error::model_service(format!("{} not set", key_var)));
        }

        tracing::debug!(
            provider = ?self.config.provider,
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Calling LLM"
        );

        let call = async {
            match self.config.provider {
                RigProvider::OpenAI => self.call_openai(request).await,
                RigProvider::Anthropic => self.call_anthropic(request).await,
            }
        };

        let content = with_deadline(self.config.timeout, call).await?;

        if content.trim().is_empty() {
            return Err(Error::model_service("Model returned an empty completion"));
        }

        Ok(LlmResponse {
            usage: LlmUsage::estimate(&request.prompt, &content),
            content,
            finish_reason: "stop".to_string(),
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
