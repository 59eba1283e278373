// Configuration loader
// Reads ~/.sage/config.toml if present, then applies environment overrides.
// Environment variables always win so deployments can run file-less.

use anyhow::{Context, Result};
use std::fs;

use super::settings::{AppEnv, Config};

/// Load configuration once at process start.
pub fn load_config() -> Result<Config> {
    let mut config = try_load_from_file()?.unwrap_or_default();
    apply_env_overrides(&mut config);
    config.normalize();
    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

fn try_load_from_file() -> Result<Option<Config>> {
    let Some(home) = dirs::home_dir() else {
        return Ok(None);
    };
    let config_path = home.join(".sage/config.toml");
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "loaded configuration file");
    Ok(Some(config))
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(key) = env_var("LLAMA_API_KEY") {
        config.llama.api_key = Some(key);
    }
    if let Some(url) = env_var("LLAMA_BASE_URL") {
        config.llama.base_url = url;
    }
    if let Some(model) = env_var("LLAMA_MODEL") {
        config.llama.model = model;
    }
    if let Some(key) = env_var("MISTRAL_API_KEY") {
        config.mistral.api_key = Some(key);
    }
    if let Some(model) = env_var("MISTRAL_MODEL") {
        config.mistral.model = model;
    }
    if let Some(raw) = env_var("AI_REQUEST_TIMEOUT_MS") {
        match raw.parse::<u64>() {
            Ok(ms) => config.request_timeout_ms = ms,
            Err(_) => tracing::warn!(value = %raw, "ignoring unparseable AI_REQUEST_TIMEOUT_MS"),
        }
    }
    if let Some(raw) = env_var("ALLOWED_ORIGINS") {
        config.allowed_origins = parse_origin_list(&raw);
    }
    if let Some(raw) = env_var("APP_ENV") {
        config.app_env = AppEnv::parse(&raw);
    }
    if let Some(addr) = env_var("BIND_ADDRESS") {
        config.bind_address = addr;
    }
}

/// Non-empty environment variable, or None.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated origin list, dropping empty entries.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
