// HTTP request/response bodies
//
// Request fields that handler-level validation checks for presence are
// Option<String>: a missing field is rejected by the handler with a route
// message, while an empty string flows through to service validation.

use serde::{Deserialize, Serialize};

use crate::ai::tasks::ChatMode;
use crate::ai::ModelStatus;
use crate::providers::ModelChoice;

#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    pub prompt: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    pub content: String,
    pub model: ModelChoice,
}

#[derive(Debug, Deserialize)]
pub struct ResolveDoubtRequest {
    pub question: Option<String>,
    pub context: Option<String>,
    pub curriculum: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeachingContentRequest {
    pub topic: Option<String>,
    pub curriculum: Option<String>,
    /// Pre-built prompt that bypasses the teaching template.
    pub prompt: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub topic: Option<String>,
    pub context: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyChatRequest {
    pub message: Option<String>,
    pub topic_name: Option<String>,
    pub subject_name: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyChatResponse {
    pub mode: ChatMode,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models: ModelStatus,
    pub limits: Limits,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub max_prompt_length: usize,
}

/// Uniform error body: `error` is always present; `message` carries the
/// underlying detail and is only set outside production.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
