// Doubt resolution task
//
// A student asks a question mid-lesson; the reply must explain, give worked
// examples, and optionally pose a follow-up quiz question. This is a
// conversational path: an unparseable reply degrades to the raw text instead
// of failing the request.

use serde::Serialize;
use serde_json::Value;

use crate::ai::extract::{extract_json, str_field, string_array_field};
use crate::providers::GenerationRequest;

const MAX_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = "You are a patient, encouraging tutor. Explain concepts simply, \
use concrete examples, and keep the student's level in mind.";

#[derive(Debug, Clone)]
pub struct DoubtParams {
    pub question: String,
    /// Topic the student is currently studying, if known.
    pub context: Option<String>,
    /// Curriculum extract relevant to the question, if available.
    pub curriculum: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtResolution {
    pub explanation: String,
    pub examples: Vec<String>,
    pub quiz_question: Option<Value>,
}

pub fn build_request(params: &DoubtParams) -> GenerationRequest {
    let mut prompt = String::new();
    if let Some(context) = params.context.as_deref().filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("The student is studying: {}\n", context.trim()));
    }
    if let Some(curriculum) = params
        .curriculum
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        prompt.push_str(&format!("Relevant curriculum material:\n{}\n", curriculum.trim()));
    }
    prompt.push_str(&format!(
        "\nThe student asks: {}\n\n\
         Respond with a JSON object of this exact shape:\n\
         {{\"explanation\": \"clear explanation of the concept\", \
         \"examples\": [\"worked example 1\", \"worked example 2\"], \
         \"quizQuestion\": {{\"question\": \"...\", \"options\": [\"...\"], \"correctAnswer\": 0}}}}\n\
         Return only the JSON object. If a follow-up quiz question does not fit, \
         set quizQuestion to null.",
        params.question.trim()
    ));

    GenerationRequest::new(prompt)
        .with_system(SYSTEM_PROMPT)
        .with_max_tokens(MAX_TOKENS)
}

/// Lenient parse: every field has a default, and a reply with no JSON at all
/// becomes the explanation verbatim so the student still sees an answer.
pub fn parse_response(raw: &str) -> DoubtResolution {
    let object = extract_json(raw);
    let explanation = str_field(&object, "explanation", raw.trim());
    let examples = string_array_field(&object, "examples");
    let quiz_question = object
        .get("quizQuestion")
        .filter(|v| !v.is_null())
        .cloned();

    DoubtResolution {
        explanation,
        examples,
        quiz_question,
    }
}
