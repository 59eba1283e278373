// Configuration structures
//
// All process-wide state lives here: provider credentials, model names, the
// request timeout, and the HTTP surface settings. Loaded once at startup and
// passed by reference into constructors; nothing mutates it afterwards.

use std::time::Duration;

use serde::Deserialize;

use super::constants::{
    DEFAULT_HTTP_ADDR, DEFAULT_LLAMA_BASE_URL, DEFAULT_LLAMA_MODEL, DEFAULT_MISTRAL_MODEL,
    DEFAULT_TIMEOUT_MS, MIN_TIMEOUT_MS,
};

/// Deployment environment. Controls whether error detail leaks to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    #[default]
    Production,
}

impl AppEnv {
    /// Parse from an environment string; anything but "development" is
    /// treated as production so detail exposure is strictly opt-in.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            AppEnv::Development
        } else {
            AppEnv::Production
        }
    }
}

/// Settings for the primary (OpenAI-compatible) provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlamaConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for LlamaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLAMA_BASE_URL.to_string(),
            model: DEFAULT_LLAMA_MODEL.to_string(),
        }
    }
}

/// Settings for the secondary (Mistral) provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MistralConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MISTRAL_MODEL.to_string(),
        }
    }
}

/// Top-level immutable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llama: LlamaConfig,
    pub mistral: MistralConfig,
    /// Per-attempt generation budget in milliseconds. Clamped to
    /// `MIN_TIMEOUT_MS` by `normalize`.
    pub request_timeout_ms: u64,
    /// Origins allowed by CORS in addition to localhost and Vercel previews.
    pub allowed_origins: Vec<String>,
    pub app_env: AppEnv,
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llama: LlamaConfig::default(),
            mistral: MistralConfig::default(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            allowed_origins: Vec::new(),
            app_env: AppEnv::default(),
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn is_development(&self) -> bool {
        self.app_env == AppEnv::Development
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Enforce invariants that have a sensible fallback instead of failing
    /// startup: the timeout floor, and whitespace in the origin list.
    pub fn normalize(&mut self) {
        if self.request_timeout_ms < MIN_TIMEOUT_MS {
            tracing::warn!(
                configured = self.request_timeout_ms,
                floor = MIN_TIMEOUT_MS,
                "request timeout below floor, clamping"
            );
            self.request_timeout_ms = MIN_TIMEOUT_MS;
        }
        self.allowed_origins = self
            .allowed_origins
            .iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    /// Reject configurations that cannot serve requests at all.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.llama.base_url.trim().is_empty() {
            anyhow::bail!("llama base URL must not be empty");
        }
        if self.llama.model.trim().is_empty() || self.mistral.model.trim().is_empty() {
            anyhow::bail!("provider model names must not be empty");
        }
        if self.bind_address.trim().is_empty() {
            anyhow::bail!("bind address must not be empty");
        }
        Ok(())
    }
}
