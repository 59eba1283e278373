// Quiz generation task
//
// Produces multiple-choice questions for a topic. Like teaching content,
// a quiz is unusable without valid JSON, so parsing fails loudly.

use serde::{Deserialize, Serialize};

use crate::ai::extract::try_extract_json;
use crate::error::{AiError, Result};
use crate::providers::GenerationRequest;

const MAX_TOKENS: u32 = 2048;
const QUESTION_COUNT: usize = 5;

const SYSTEM_PROMPT: &str = "You write fair multiple-choice quizzes that test understanding, \
not trivia. Always answer with a single JSON object and nothing else.";

#[derive(Debug, Clone)]
pub struct QuizParams {
    pub topic: String,
    /// Lesson or curriculum text the quiz should draw from, if available.
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    /// Exactly four answer options in the expected shape.
    pub options: Vec<String>,
    /// Index into `options`, 0-3.
    pub correct_answer: u32,
    pub explanation: String,
}

pub fn build_request(params: &QuizParams) -> GenerationRequest {
    let mut prompt = format!(
        "Create a quiz of {} multiple-choice questions on the topic: {}\n",
        QUESTION_COUNT,
        params.topic.trim()
    );
    if let Some(context) = params.context.as_deref().filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!(
            "Draw the questions from this material:\n{}\n",
            context.trim()
        ));
    }
    prompt.push_str(
        "\nRespond with a JSON object of this exact shape:\n\
         {\"questions\": [{\"question\": \"...\", \
         \"options\": [\"A\", \"B\", \"C\", \"D\"], \
         \"correctAnswer\": 0, \
         \"explanation\": \"why the answer is correct\"}]}\n\
         Each question has exactly 4 options and correctAnswer is the 0-based \
         index of the right one. Return only the JSON object.",
    );

    GenerationRequest::new(prompt)
        .with_system(SYSTEM_PROMPT)
        .with_max_tokens(MAX_TOKENS)
}

/// Strict parse: no JSON object in the reply is a hard failure.
pub fn parse_response(raw: &str) -> Result<Quiz> {
    let object = try_extract_json(raw)?;
    serde_json::from_value(object).map_err(|e| AiError::StructuredGeneration(e.to_string()))
}
