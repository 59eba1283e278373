// Teaching content generation task
//
// Produces a structured lesson for a topic. Callers may hand over a fully
// pre-built prompt, in which case the template is bypassed and the text goes
// to the provider verbatim. A lesson without valid JSON is unusable, so
// parsing here fails loudly instead of degrading.

use serde::{Deserialize, Serialize};

use crate::ai::extract::try_extract_json;
use crate::error::{AiError, Result};
use crate::providers::GenerationRequest;

const MAX_TOKENS: u32 = 4096;

const SYSTEM_PROMPT: &str = "You are a curriculum author writing clear, well-structured lessons. \
Always answer with a single JSON object and nothing else.";

#[derive(Debug, Clone)]
pub struct TeachingParams {
    pub topic: String,
    /// Curriculum extract to ground the lesson in, if available.
    pub curriculum: Option<String>,
    /// Pre-built prompt. When set, topic and curriculum are ignored and this
    /// text is sent as-is.
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TeachingContent {
    pub title: String,
    pub sections: Vec<TeachingSection>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TeachingSection {
    pub title: String,
    pub content: String,
}

pub fn build_request(params: &TeachingParams) -> GenerationRequest {
    // Bypass mode: the caller already built the full prompt.
    if let Some(prompt) = params.prompt.as_deref().filter(|p| !p.trim().is_empty()) {
        return GenerationRequest::new(prompt).with_max_tokens(MAX_TOKENS);
    }

    let mut prompt = format!(
        "Write a complete lesson teaching the topic: {}\n",
        params.topic.trim()
    );
    if let Some(curriculum) = params
        .curriculum
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        prompt.push_str(&format!(
            "Base the lesson on this curriculum material:\n{}\n",
            curriculum.trim()
        ));
    }
    prompt.push_str(
        "\nRespond with a JSON object of this exact shape:\n\
         {\"title\": \"lesson title\", \
         \"sections\": [{\"title\": \"section title\", \"content\": \"section body\"}], \
         \"summary\": \"two-sentence recap\"}\n\
         Return only the JSON object.",
    );

    GenerationRequest::new(prompt)
        .with_system(SYSTEM_PROMPT)
        .with_max_tokens(MAX_TOKENS)
}

/// Strict parse: no JSON object in the reply is a hard failure. Fields the
/// model omitted default to empty rather than failing.
pub fn parse_response(raw: &str) -> Result<TeachingContent> {
    let object = try_extract_json(raw)?;
    serde_json::from_value(object).map_err(|e| AiError::StructuredGeneration(e.to_string()))
}
