// Project-wide constants
//
// Centralised here so limits and magic values have one source of truth.
// Import via `use crate::config::constants::*;`.

/// Maximum accepted length (in characters, after trimming) for any
/// user-supplied prompt, question, or topic.
pub const MAX_PROMPT_LENGTH: usize = 32_000;

/// Sampling temperature used at every call site.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default wall-clock budget for a single generation attempt.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Lowest timeout the configuration accepts; smaller values are clamped up.
pub const MIN_TIMEOUT_MS: u64 = 5_000;

/// Default bind address for the HTTP server (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";

/// OpenAI-compatible endpoint serving the primary (Llama) models.
pub const DEFAULT_LLAMA_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model name for the primary provider.
pub const DEFAULT_LLAMA_MODEL: &str = "llama-3.3-70b-versatile";

/// Default model name for the secondary provider.
pub const DEFAULT_MISTRAL_MODEL: &str = "mistral-small-latest";
