// Unified request types for the text-generation providers
//
// Task templates build a GenerationRequest; each provider transforms it into
// its own wire format. The request is immutable once built.

use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_TEMPERATURE;

/// Which backend a request is dispatched to.
///
/// `Llama` is the primary provider and the default whenever the caller
/// omits or misspells the model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    #[default]
    Llama,
    Mistral,
}

impl ModelChoice {
    /// Resolve an optional user-supplied model name. Unknown names fall back
    /// to the primary provider rather than failing the request.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.trim().eq_ignore_ascii_case("mistral") => ModelChoice::Mistral,
            _ => ModelChoice::Llama,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Llama => "llama",
            ModelChoice::Mistral => "mistral",
        }
    }
}

/// One chat message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Provider-agnostic generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The task prompt, always sent as the trailing user message.
    pub prompt: String,
    /// Optional system prompt, sent as a single leading system message.
    pub system: Option<String>,
    /// Which provider handles this request.
    pub model: ModelChoice,
    /// Generation budget for the reply.
    pub max_tokens: u32,
    /// Sampling temperature. Fixed at 0.3 across all call sites.
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            model: ModelChoice::default(),
            max_tokens: 1024,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_model(mut self, model: ModelChoice) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Wire-ordered message list: at most one system message, then exactly
    /// one user message carrying the prompt.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(self.prompt.clone()));
        messages
    }
}
