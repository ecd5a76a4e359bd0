//! Tutor system framing and fixed chat strings

/// Reply used when no session exists
pub const DEMO_MODE_REPLY: &str = "I'm currently running in demo mode (no API key detected). I would normally explain this concept in depth using Gemini models. Please configure an API key to unlock full tutoring capabilities!";

/// Reply used when the service answers without text
pub const EMPTY_REPLY: &str = "I couldn't generate a response at this time.";

/// Reply used when the service call fails
pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error connecting to the AI tutor service.";

/// Generates the system instruction for a tutor session on `topic`
///
/// # Examples
///
/// ```
/// use studyscout::prompts::generate_tutor_prompt;
///
/// let prompt = generate_tutor_prompt("Organic Chemistry");
/// assert!(prompt.contains("expert academic tutor specializing in Organic Chemistry"));
/// assert!(prompt.contains("200 words"));
/// ```
pub fn generate_tutor_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert academic tutor specializing in {topic}.
Keep answers concise, educational, and encouraging.
Use bullet points for complex concepts.
If asked about code, provide clean snippets.
Limit responses to under 200 words unless asked for detail."#,
        topic = topic.trim()
    )
}

/// Greeting shown as the first model message of a new conversation
pub fn welcome_message(topic: &str) -> String {
    format!(
        "Hello! I'm your AI Tutor for **{}**. Ask me to explain concepts, quiz you, or summarize tricky parts!",
        topic.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutor_prompt_trims_topic() {
        let prompt = generate_tutor_prompt("  Calculus \n");
        assert!(prompt.starts_with("You are an expert academic tutor specializing in Calculus."));
        assert!(prompt.contains("encouraging"));
    }

    #[test]
    fn test_welcome_message_mentions_topic() {
        assert!(welcome_message("Rust").contains("**Rust**"));
    }

    #[test]
    fn test_fixed_replies_are_distinct() {
        assert_ne!(DEMO_MODE_REPLY, APOLOGY_REPLY);
        assert_ne!(EMPTY_REPLY, APOLOGY_REPLY);
    }
}
