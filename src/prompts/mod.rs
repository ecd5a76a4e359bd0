//! Prompts and response contracts for the generative service
//!
//! Each submodule owns one request shape: the prompt text sent to the
//! service and, for structured requests, the decode step that turns the
//! untrusted reply into trusted values.

pub mod resource_prompt;
pub mod summary_prompt;
pub mod tutor_prompt;

pub use resource_prompt::{decode_resources, generate_resource_prompt};
pub use summary_prompt::{decode_summary, excerpt, generate_summary_prompt};
pub use tutor_prompt::{generate_tutor_prompt, welcome_message};

/// Removes a surrounding Markdown code fence, if any
///
/// Models asked for JSON sometimes wrap it in ```` ```json ```` fences.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Returns the span from the first `[` to the last `]`, inclusive
pub(crate) fn extract_array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
