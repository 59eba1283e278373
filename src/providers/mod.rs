// Text-generation providers
//
// This module abstracts over the two LLM backends (an OpenAI-compatible
// endpoint serving Llama models, and Mistral) behind a single capability:
// turn a GenerationRequest into normalized reply text.

use async_trait::async_trait;

use crate::error::Result;

pub mod factory;
pub mod llama;
pub mod mistral;
pub mod types;

pub use factory::ProviderSet;
pub use llama::LlamaProvider;
pub use mistral::MistralProvider;
pub use types::{ChatMessage, GenerationRequest, ModelChoice};

/// Trait for text-generation providers.
///
/// Implementations normalize their provider-specific response shape down to
/// a single non-empty string, and report a `NotConfigured` error before any
/// network call when their credential is absent.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate reply text for a request. Never returns an empty string;
    /// an empty normalized reply is an `EmptyResponse` error.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Provider name ("llama" or "mistral").
    fn name(&self) -> &'static str;

    /// Model name used when the request does not override it.
    fn default_model(&self) -> &str;

    /// Whether a credential is present. Reported by /health.
    fn is_configured(&self) -> bool;
}
