// Chat classification task
//
// Decides whether an incoming chat message is about the subject being
// studied or general conversation. The model is asked for a single bare
// word; classification is a substring match so "Subject_specific." and
// similar decorated replies still land correctly. Anything ambiguous,
// including an empty reply, is general.

use serde::{Deserialize, Serialize};

use crate::providers::GenerationRequest;

const MAX_TOKENS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    General,
    SubjectSpecific,
}

#[derive(Debug, Clone)]
pub struct ClassifyParams {
    pub message: String,
    pub topic_name: Option<String>,
    pub subject_name: Option<String>,
}

pub fn build_request(params: &ClassifyParams) -> GenerationRequest {
    let mut prompt = String::from("Classify the student's chat message.\n");
    if let Some(subject) = params
        .subject_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        prompt.push_str(&format!("Subject being studied: {}\n", subject.trim()));
    }
    if let Some(topic) = params.topic_name.as_deref().filter(|t| !t.trim().is_empty()) {
        prompt.push_str(&format!("Current topic: {}\n", topic.trim()));
    }
    prompt.push_str(&format!(
        "\nMessage: {}\n\n\
         Answer with exactly one word: subject_specific if the message is about \
         the subject or topic above, or general for anything else.",
        params.message.trim()
    ));

    GenerationRequest::new(prompt).with_max_tokens(MAX_TOKENS)
}

/// Substring classification of the model's reply.
pub fn classify_response(raw: &str) -> ChatMode {
    if raw.to_lowercase().contains("subject_specific") {
        ChatMode::SubjectSpecific
    } else {
        ChatMode::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_word_replies() {
        assert_eq!(classify_response("general"), ChatMode::General);
        assert_eq!(
            classify_response("subject_specific"),
            ChatMode::SubjectSpecific
        );
    }

    #[test]
    fn test_decorated_replies_match_by_substring() {
        assert_eq!(classify_response("General."), ChatMode::General);
        assert_eq!(
            classify_response("The answer is: Subject_Specific!"),
            ChatMode::SubjectSpecific
        );
    }

    #[test]
    fn test_empty_reply_defaults_to_general() {
        assert_eq!(classify_response(""), ChatMode::General);
        assert_eq!(classify_response("   "), ChatMode::General);
    }

    #[test]
    fn test_ambiguous_reply_defaults_to_general() {
        assert_eq!(classify_response("maybe?"), ChatMode::General);
        // "subject specific" without the underscore does not match
        assert_eq!(classify_response("subject specific"), ChatMode::General);
    }

    #[test]
    fn test_build_request_mentions_topic_and_subject() {
        let request = build_request(&ClassifyParams {
            message: "how do volcanoes form?".to_string(),
            topic_name: Some("Plate tectonics".to_string()),
            subject_name: Some("Geography".to_string()),
        });
        assert!(request.prompt.contains("Plate tectonics"));
        assert!(request.prompt.contains("Geography"));
        assert!(request.prompt.contains("how do volcanoes form?"));
        // One-word reply, tiny budget
        assert_eq!(request.max_tokens, 8);
    }

    #[test]
    fn test_chat_mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChatMode::SubjectSpecific).unwrap(),
            r#""subject_specific""#
        );
        assert_eq!(serde_json::to_string(&ChatMode::General).unwrap(), r#""general""#);
    }
}
