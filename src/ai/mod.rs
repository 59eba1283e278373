// AI dispatch service
//
// The orchestration core: validates input, builds the task request, races
// each provider attempt against the request timeout, retries transient
// failures with backoff, and normalizes the reply for the caller.

pub mod extract;
pub mod retry;
pub mod tasks;
pub mod validate;

use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AiError, InputKind, Result};
use crate::providers::{GenerationRequest, ModelChoice, ProviderSet};
use retry::with_retry;
use tasks::classify::{self, ChatMode, ClassifyParams};
use tasks::doubt::{self, DoubtParams, DoubtResolution};
use tasks::quiz::{self, Quiz, QuizParams};
use tasks::teaching::{self, TeachingContent, TeachingParams};
use validate::validate_prompt;

/// Reply budget for free-form content generation.
const CONTENT_MAX_TOKENS: u32 = 2048;

/// Which providers hold a credential. Reported by /health.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelStatus {
    pub llama: bool,
    pub mistral: bool,
}

pub struct AiService {
    providers: ProviderSet,
    timeout: Duration,
}

impl AiService {
    pub fn new(providers: ProviderSet, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            ProviderSet::from_config(config)?,
            config.request_timeout(),
        ))
    }

    pub fn model_status(&self) -> ModelStatus {
        ModelStatus {
            llama: self.providers.llama.is_configured(),
            mistral: self.providers.mistral.is_configured(),
        }
    }

    /// Core dispatch: pick the provider, race each attempt against the
    /// timeout, retry transient failures. The losing side of the race is
    /// simply dropped; a timed-out attempt reports `Timeout` and the next
    /// attempt starts a fresh window.
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let provider = self.providers.for_choice(request.model);
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            provider = provider.name(),
            max_tokens = request.max_tokens,
            "dispatching generation request"
        );

        let result = with_retry(|| async {
            match tokio::time::timeout(self.timeout, provider.generate(request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AiError::Timeout(self.timeout)),
            }
        })
        .await;

        match &result {
            Ok(text) => {
                tracing::debug!(%request_id, reply_chars = text.len(), "generation succeeded")
            }
            Err(err) if err.is_input_error() => {
                tracing::debug!(%request_id, error = %err, "generation rejected")
            }
            Err(err) => tracing::error!(%request_id, error = %err, "generation failed"),
        }
        result
    }

    /// Free-form content generation: validated prompt in, raw reply out.
    pub async fn generate_content(&self, prompt: &str, model: ModelChoice) -> Result<String> {
        validate_prompt(prompt, InputKind::Prompt)?;
        let request = GenerationRequest::new(prompt)
            .with_model(model)
            .with_max_tokens(CONTENT_MAX_TOKENS);
        self.generate(&request).await
    }

    /// Answer a student question. Degrades to the raw reply when the model
    /// ignores the JSON contract.
    pub async fn resolve_doubt(
        &self,
        params: &DoubtParams,
        model: ModelChoice,
    ) -> Result<DoubtResolution> {
        validate_prompt(&params.question, InputKind::Question)?;
        let request = doubt::build_request(params).with_model(model);
        let raw = self.generate(&request).await?;
        Ok(doubt::parse_response(&raw))
    }

    /// Generate a structured lesson. Invalid JSON from the model is a hard
    /// failure here.
    pub async fn teaching_content(
        &self,
        params: &TeachingParams,
        model: ModelChoice,
    ) -> Result<TeachingContent> {
        // Validate whichever text is actually sent: the bypass prompt when
        // present, the topic otherwise.
        match params.prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(prompt) => validate_prompt(prompt, InputKind::Prompt)?,
            None => validate_prompt(&params.topic, InputKind::Topic)?,
        }
        let request = teaching::build_request(params).with_model(model);
        let raw = self.generate(&request).await?;
        teaching::parse_response(&raw)
    }

    /// Generate a multiple-choice quiz. Invalid JSON is a hard failure.
    pub async fn generate_quiz(&self, params: &QuizParams, model: ModelChoice) -> Result<Quiz> {
        validate_prompt(&params.topic, InputKind::Topic)?;
        let request = quiz::build_request(params).with_model(model);
        let raw = self.generate(&request).await?;
        quiz::parse_response(&raw)
    }

    /// Classify a chat message. This path never fails: validation problems,
    /// provider errors, and unusable replies all degrade to `General`.
    pub async fn classify_chat(&self, params: &ClassifyParams, model: ModelChoice) -> ChatMode {
        if validate_prompt(&params.message, InputKind::Message).is_err() {
            return ChatMode::General;
        }
        let request = classify::build_request(params).with_model(model);
        match self.generate(&request).await {
            Ok(raw) => classify::classify_response(&raw),
            Err(err) => {
                tracing::warn!(error = %err, "classification failed, degrading to general");
                ChatMode::General
            }
        }
    }
}
