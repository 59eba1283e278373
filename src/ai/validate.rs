// Prompt validation
//
// Length and emptiness bounds applied before any text reaches a provider.
// Pure functions, no I/O.

use crate::config::constants::MAX_PROMPT_LENGTH;
use crate::error::{AiError, InputKind, Result};

/// Validate user-supplied text against the prompt bounds.
///
/// Counts characters on the trimmed input; `kind` only affects the error
/// message.
pub fn validate_prompt(text: &str, kind: InputKind) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AiError::EmptyInput(kind));
    }
    if trimmed.chars().count() > MAX_PROMPT_LENGTH {
        return Err(AiError::TooLong(kind));
    }
    Ok(())
}
