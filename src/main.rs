#![deny(unused)]
//! Code Review Service
//!
//! Accepts a repository URL, an assignment description and a candidate
//! level, and returns an LLM-generated code-quality assessment. Results are
//! cached so identical requests never reach the model twice.

use std::sync::Arc;
use std::time::Duration;

use code_review_controller::{AnalysisConfig, AnalysisOrchestrator};
use code_review_core::config::AppConfig;
use code_review_core::traits::ContentCache;
use code_review_gateway::{GatewayConfig, GatewayServer};
use code_review_github::{GitHubClient, GitHubClientConfig};
use code_review_store::{InMemoryContentCache, RedisContentCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    code_review_governance::configure_tracing(config.telemetry.json_logs)?;

    tracing::info!("Starting Code Review Service v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // Repository host
    // =========================================================================
    let github = Arc::new(GitHubClient::new(GitHubClientConfig {
        api_url: config.github.api_url.clone(),
        token: config.github.token.clone(),
        timeout: Duration::from_secs(config.github.timeout_secs),
        max_pages: config.github.max_pages.max(1),
        user_agent: config.github.user_agent.clone(),
    })?);

    if config.github.token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set; listing requests are unauthenticated and heavily rate limited");
    }

    // =========================================================================
    // Assessment cache
    // =========================================================================
    let cache: Arc<dyn ContentCache> = match config.cache.redis_url {
        Some(ref redis_url) => {
            tracing::info!(prefix = %config.cache.prefix, "Initializing Redis content cache");
            Arc::new(RedisContentCache::new(redis_url, &config.cache.prefix)?)
        }
        None => {
            tracing::info!("Initializing in-memory content cache");
            let memory = Arc::new(InMemoryContentCache::new());
            let _sweeper = memory.spawn_cleanup(Duration::from_secs(code_review_store::CLEANUP_INTERVAL_SECS));
            memory
        }
    };

    // =========================================================================
    // Completion service
    // =========================================================================
    let llm = Arc::new(code_review_model_gateway::create_client_from_config(&config.model)?);

    tracing::info!(
        provider = %config.model.provider,
        model = %config.model.model,
        "Completion service configured"
    );

    // =========================================================================
    // Pipeline
    // =========================================================================
    let orchestrator = AnalysisOrchestrator::builder()
        .with_host(github.clone())
        .with_content_source(github)
        .with_cache(cache)
        .with_llm(llm)
        .with_config(AnalysisConfig {
            max_tokens: config.model.max_tokens,
            temperature: config.model.temperature,
            ttl: Duration::from_secs(config.cache.ttl_secs),
            key_policy: config.cache.key_policy,
        })
        .build()?;

    // =========================================================================
    // HTTP gateway
    // =========================================================================
    let mut server = GatewayServer::new(
        GatewayConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            ..GatewayConfig::default()
        },
        Arc::new(orchestrator),
    );

    if config.telemetry.metrics {
        let handle = code_review_governance::setup_metrics_recorder()?;
        server = server.with_metrics(handle);
    }

    server.run().await?;

    Ok(())
}
