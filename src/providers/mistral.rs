// Secondary provider: Mistral chat completions
//
// Mistral's message content is either a plain string or an array of typed
// chunks; only chunks whose type is "text" carry prose. Normalization down
// to a single string lives here so the rest of the crate never sees chunks.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ChatMessage, GenerationRequest};
use super::TextProvider;
use crate::config::MistralConfig;
use crate::error::{AiError, Result};

const PROVIDER_NAME: &str = "mistral";
const MISTRAL_BASE_URL: &str = "https://api.mistral.ai";
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct MistralProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl MistralProvider {
    pub fn new(config: &MistralConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: MISTRAL_BASE_URL.to_string(),
            model: config.model.clone(),
        })
    }

    /// Point the provider at a different endpoint. Used by tests.
    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn to_wire_request(&self, request: &GenerationRequest) -> MistralRequest {
        MistralRequest {
            model: self.model.clone(),
            messages: request.messages(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl TextProvider for MistralProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured {
            provider: PROVIDER_NAME,
        })?;

        let wire_request = self.to_wire_request(request);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(model = %self.model, "sending mistral chat completion request");

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

        let parsed: MistralResponse = response
            .json()
            .await
            .context("Failed to parse mistral API response")?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.into_text())
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
struct MistralRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct MistralResponse {
    choices: Vec<MistralChoice>,
}

#[derive(Debug, Deserialize)]
struct MistralChoice {
    message: MistralMessage,
}

#[derive(Debug, Deserialize)]
struct MistralMessage {
    #[serde(default)]
    content: MistralContent,
}

/// Content arrives as a bare string or as typed chunks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MistralContent {
    Text(String),
    Chunks(Vec<MistralChunk>),
}

impl Default for MistralContent {
    fn default() -> Self {
        MistralContent::Text(String::new())
    }
}

impl MistralContent {
    /// Concatenate plain-text chunks, dropping every other chunk type.
    fn into_text(self) -> String {
        match self {
            MistralContent::Text(text) => text,
            MistralContent::Chunks(chunks) => chunks
                .into_iter()
                .filter(|c| c.chunk_type == "text")
                .filter_map(|c| c.text)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MistralChunk {
    #[serde(rename = "type")]
    chunk_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_for(server: &mockito::ServerGuard, api_key: Option<&str>) -> MistralProvider {
        MistralProvider::new(&MistralConfig {
            api_key: api_key.map(String::from),
            model: "mistral-test".to_string(),
        })
        .unwrap()
        .with_base_url(server.url())
    }

    #[test]
    fn test_plain_string_content_normalizes() {
        let content = MistralContent::Text("plain reply".to_string());
        assert_eq!(content.into_text(), "plain reply");
    }

    #[test]
    fn test_chunked_content_keeps_only_text_chunks() {
        let content = MistralContent::Chunks(vec![
            MistralChunk {
                chunk_type: "text".to_string(),
                text: Some("part one ".to_string()),
            },
            MistralChunk {
                chunk_type: "reference".to_string(),
                text: Some("ignored".to_string()),
            },
            MistralChunk {
                chunk_type: "text".to_string(),
                text: Some("part two".to_string()),
            },
        ]);
        assert_eq!(content.into_text(), "part one part two");
    }

    #[tokio::test]
    async fn test_generate_with_string_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"bonjour"}}]}"#)
            .create_async()
            .await;

        let provider = provider_for(&server, Some("key"));
        let text = provider
            .generate(&GenerationRequest::new("hello"))
            .await
            .unwrap();
        assert_eq!(text, "bonjour");
    }

    #[tokio::test]
    async fn test_generate_with_chunked_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":[
                    {"type":"text","text":"first"},
                    {"type":"tool_call","text":"skip me"},
                    {"type":"text","text":" second"}
                ]}}]}"#,
            )
            .create_async()
            .await;

        let provider = provider_for(&server, Some("key"));
        let text = provider
            .generate(&GenerationRequest::new("hello"))
            .await
            .unwrap();
        assert_eq!(text, "first second");
    }

    #[tokio::test]
    async fn test_only_non_text_chunks_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":[
                    {"type":"image_url","text":null}
                ]}}]}"#,
            )
            .create_async()
            .await;

        let provider = provider_for(&server, Some("key"));
        let err = provider
            .generate(&GenerationRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits_before_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let provider = provider_for(&server, None);
        let err = provider
            .generate(&GenerationRequest::new("hi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AiError::NotConfigured {
                provider: "mistral"
            }
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_transient_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":"rate limited"}"#)
            .create_async()
            .await;

        let provider = provider_for(&server, Some("key"));
        let err = provider
            .generate(&GenerationRequest::new("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::Api { status: 429, .. }));
        assert!(err.is_transient());
    }
}
