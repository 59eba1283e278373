// Primary provider: OpenAI-compatible chat completions serving Llama models
//
// The default deployment points at Groq's OpenAI-compatible endpoint, but any
// server speaking the same format works (the base URL is configuration).
// Response content here is always a plain string.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ChatMessage, GenerationRequest};
use super::TextProvider;
use crate::config::LlamaConfig;
use crate::error::{AiError, Result};

const PROVIDER_NAME: &str = "llama";
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct LlamaProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl LlamaProvider {
    pub fn new(config: &LlamaConfig) -> anyhow::Result<Self> {
        // The per-attempt deadline is the service-level timeout race; the
        // client only bounds connection establishment.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn to_wire_request(&self, request: &GenerationRequest) -> LlamaRequest {
        LlamaRequest {
            model: self.model.clone(),
            messages: request.messages(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl TextProvider for LlamaProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        // Credential check happens before any network I/O and is never retried.
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured {
            provider: PROVIDER_NAME,
        })?;

        let wire_request = self.to_wire_request(request);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(model = %self.model, "sending llama chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|source| AiError::Transport {
                provider: PROVIDER_NAME,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: LlamaResponse = response
            .json()
            .await
            .context("Failed to parse llama API response")?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse {
                provider: PROVIDER_NAME,
            });
        }

        Ok(text)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct LlamaRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct LlamaResponse {
    choices: Vec<LlamaChoice>,
}

#[derive(Debug, Deserialize)]
struct LlamaChoice {
    message: LlamaMessage,
}

#[derive(Debug, Deserialize)]
struct LlamaMessage {
    content: Option<String>,
}
