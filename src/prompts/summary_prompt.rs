//! Three-bullet resource summary prompt and decoder

use super::{extract_array_span, strip_code_fences};
use crate::error::DecodeError;

/// Characters kept when a summary reply holds no JSON array
const EXCERPT_CHARS: usize = 100;

/// Summary returned when the live request fails
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable in demo mode.";

/// Generates the summary prompt for a resource
///
/// # Examples
///
/// ```
/// use studyscout::prompts::generate_summary_prompt;
///
/// let prompt = generate_summary_prompt("Attention Is All You Need", "Transformers");
/// assert!(prompt.contains("\"Attention Is All You Need\""));
/// assert!(prompt.contains("JSON array of strings"));
/// ```
pub fn generate_summary_prompt(title: &str, context: &str) -> String {
    format!(
        r#"Provide a 3-bullet point summary for an educational resource titled "{}" about "{}".
Format the output as a JSON array of strings. Example: ["Point 1", "Point 2", "Point 3"]"#,
        title.trim(),
        context.trim()
    )
}

/// Decodes the bullet list from a summary reply
///
/// # Errors
///
/// Returns `DecodeError::NoArray` when the reply holds no `[...]` span, and
/// `InvalidJson` or `EmptyBatch` when the span is not a non-empty string array
pub fn decode_summary(text: &str) -> Result<Vec<String>, DecodeError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(DecodeError::EmptyResponse);
    }
    let span = extract_array_span(body).ok_or(DecodeError::NoArray)?;
    let bullets: Vec<String> =
        serde_json::from_str(span).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    let bullets: Vec<String> = bullets
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect();
    if bullets.is_empty() {
        return Err(DecodeError::EmptyBatch);
    }
    Ok(bullets)
}

/// First 100 characters of `text` followed by an ellipsis
pub fn excerpt(text: &str) -> String {
    let head: String = text.trim().chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head)
}
