#![deny(unused)]
//! Completion service gateway for the code review service.
//!
//! This crate provides the Rig-backed `LlmClient` used to obtain
//! assessments, plus construction from the `[model]` config section.

pub mod rig_client;

pub use rig_client::{RigConfig, RigLlmClient, RigProvider};

use code_review_core::config::ModelConfig;
use std::time::Duration;

/// Create an LLM client from the `[model]` config section.
pub fn create_client_from_config(config: &ModelConfig) -> code_review_core::Result<RigLlmClient> {
    let provider = RigProvider::from_name(&config.provider)?;

    // The review prompt carries its own role framing, so no preamble
    let rig_cfg = RigConfig {
        provider,
        model: config.model.clone(),
        system_prompt: None,
        timeout: Duration::from_secs(config.timeout_secs),
    };

    let client = RigLlmClient::new(rig_cfg);
    if !client.has_api_key() {
        tracing::warn!(
            provider = %config.provider,
            "{} not set; completion requests will fail",
            provider.api_key_var()
        );
    }

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_review_core::traits::LlmClient;

    #[test]
    fn test_create_client_from_config() {
        let config = ModelConfig {
            provider: "anthropic".into(),
            model: "claude-3-haiku-20240307".into(),
            max_tokens: 500,
            temperature: 0.5,
            timeout_secs: 10,
        };
        let client = create_client_from_config(&config).unwrap();
        assert_eq!(client.model(), "claude-3-haiku-20240307");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = ModelConfig {
            provider: "mystery".into(),
            model: "m".into(),
            max_tokens: 500,
            temperature: 0.5,
            timeout_secs: 10,
        };
        assert!(create_client_from_config(&config).is_err());
    }
}
