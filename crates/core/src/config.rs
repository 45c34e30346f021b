use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::types::CacheKeyPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub github: GithubConfig,
    pub model: ModelConfig,
    pub cache: CacheConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<Secret<String>>,
    pub timeout_secs: u64,
    pub max_pages: u32,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub prefix: String,
    pub ttl_secs: u64,
    pub key_policy: CacheKeyPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub json_logs: bool,
    pub metrics: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let defaults = Self::default();

        let s = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("github.api_url", defaults.github.api_url)?
            .set_default("github.timeout_secs", defaults.github.timeout_secs as i64)?
            .set_default("github.max_pages", defaults.github.max_pages as i64)?
            .set_default("github.user_agent", defaults.github.user_agent)?
            .set_default("model.provider", defaults.model.provider)?
            .set_default("model.model", defaults.model.model)?
            .set_default("model.max_tokens", defaults.model.max_tokens as i64)?
            .set_default("model.temperature", defaults.model.temperature as f64)?
            .set_default("model.timeout_secs", defaults.model.timeout_secs as i64)?
            .set_default("cache.prefix", defaults.cache.prefix)?
            .set_default("cache.ttl_secs", defaults.cache.ttl_secs as i64)?
            .set_default("cache.key_policy", "request")?
            .set_default("telemetry.json_logs", defaults.telemetry.json_logs)?
            .set_default("telemetry.metrics", defaults.telemetry.metrics)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__GITHUB__MAX_PAGES=10 to github.max_pages
            .add_source(Environment::with_prefix("APP").separator("__"))
            .set_override_option("github.token", std::env::var("GITHUB_TOKEN").ok())?
            .set_override_option("cache.redis_url", std::env::var("REDIS_URL").ok())?
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            github: GithubConfig {
                api_url: "https://api.github.com".into(),
                token: None,
                timeout_secs: 30,
                max_pages: 100,
                user_agent: concat!("code-review/", env!("CARGO_PKG_VERSION")).into(),
            },
            model: ModelConfig {
                provider: "openai".into(),
                model: "gpt-4-turbo".into(),
                max_tokens: 500,
                temperature: 0.5,
                timeout_secs: 60,
            },
            cache: CacheConfig {
                redis_url: None,
                prefix: "code_review:analysis".into(),
                ttl_secs: 86_400,
                key_policy: CacheKeyPolicy::Request,
            },
            telemetry: TelemetryConfig {
                json_logs: false,
                metrics: true,
            },
        }
    }
}
