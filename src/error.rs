// Error taxonomy for the AI dispatch layer
//
// Every failure the service layer can produce is a variant here, so retry
// classification and HTTP mapping both work off the same type instead of
// string-matching error messages.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::config::constants::MAX_PROMPT_LENGTH;

pub type Result<T> = std::result::Result<T, AiError>;

/// Which user-supplied field failed validation. Only affects error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Prompt,
    Question,
    Topic,
    Message,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputKind::Prompt => "Prompt",
            InputKind::Question => "Question",
            InputKind::Topic => "Topic",
            InputKind::Message => "Message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    /// User-supplied text was empty after trimming.
    #[error("{0} cannot be empty")]
    EmptyInput(InputKind),

    /// User-supplied text exceeded the prompt length bound.
    #[error("{0} exceeds the maximum length of {} characters", MAX_PROMPT_LENGTH)]
    TooLong(InputKind),

    /// The selected provider has no API key. Raised before any network I/O.
    #[error("{provider} API key is not configured")]
    NotConfigured { provider: &'static str },

    /// The provider replied, but with nothing usable after normalization.
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: &'static str },

    /// A generation attempt lost the race against the request timeout.
    #[error("AI request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Non-success HTTP status from a provider API.
    #[error("{provider} request failed with status {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider could not be reached at all.
    #[error("failed to reach {provider}: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A structured-content task got a reply with no parseable JSON object.
    #[error("model reply did not contain a valid JSON object: {0}")]
    StructuredGeneration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AiError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Caller mistakes, missing credentials, auth/payment rejections, and
    /// unusable model output will fail identically on every attempt.
    /// Everything else, timeouts and empty responses included, is retried.
    pub fn is_transient(&self) -> bool {
        match self {
            AiError::EmptyInput(_)
            | AiError::TooLong(_)
            | AiError::NotConfigured { .. }
            | AiError::StructuredGeneration(_) => false,
            AiError::Api { status, .. } => !matches!(status, 401 | 402 | 403),
            AiError::EmptyResponse { .. }
            | AiError::Timeout(_)
            | AiError::Transport { .. }
            | AiError::Other(_) => true,
        }
    }

    /// HTTP status this error maps to at the handler layer.
    pub fn status_code(&self) -> u16 {
        match self {
            AiError::EmptyInput(_) | AiError::TooLong(_) => 400,
            _ => 500,
        }
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_input_error(&self) -> bool {
        self.status_code() == 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> AiError {
        AiError::Api {
            provider: "llama",
            status,
            body: "{}".to_string(),
        }
    }

    #[test]
    fn test_input_errors_are_not_transient() {
        assert!(!AiError::EmptyInput(InputKind::Prompt).is_transient());
        assert!(!AiError::TooLong(InputKind::Question).is_transient());
    }

    #[test]
    fn test_not_configured_is_not_transient() {
        let err = AiError::NotConfigured { provider: "mistral" };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_auth_and_payment_statuses_are_not_transient() {
        assert!(!api_error(401).is_transient());
        assert!(!api_error(402).is_transient());
        assert!(!api_error(403).is_transient());
    }

    #[test]
    fn test_rate_limit_and_server_statuses_are_transient() {
        assert!(api_error(429).is_transient());
        assert!(api_error(500).is_transient());
        assert!(api_error(503).is_transient());
    }

    #[test]
    fn test_timeout_is_transient() {
        // Pinned policy: a timed-out attempt consumes a retry slot and is
        // retried with a fresh timeout window.
        assert!(AiError::Timeout(Duration::from_secs(60)).is_transient());
    }

    #[test]
    fn test_empty_response_is_transient() {
        let err = AiError::EmptyResponse { provider: "llama" };
        assert!(err.is_transient());
    }

    #[test]
    fn test_structured_generation_is_not_transient() {
        let err = AiError::StructuredGeneration("no JSON found".to_string());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(AiError::EmptyInput(InputKind::Prompt).status_code(), 400);
        assert_eq!(AiError::TooLong(InputKind::Prompt).status_code(), 400);
        assert_eq!(api_error(429).status_code(), 500);
        assert_eq!(
            AiError::NotConfigured { provider: "llama" }.status_code(),
            500
        );
    }

    #[test]
    fn test_input_error_messages_are_user_facing() {
        assert_eq!(
            AiError::EmptyInput(InputKind::Question).to_string(),
            "Question cannot be empty"
        );
        assert_eq!(
            AiError::TooLong(InputKind::Prompt).to_string(),
            "Prompt exceeds the maximum length of 32000 characters"
        );
    }
}
