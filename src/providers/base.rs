//! Base provider trait and common types for StudyScout
//!
//! This module defines the Provider trait that generative-content backends
//! implement, along with the message, request, and response types shared by
//! the gateway and the tutor sessions.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The learner
    User,
    /// The generative model
    Model,
}

impl Role {
    /// Wire spelling of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn sent to or received from a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the turn
    pub role: Role,
    /// Plain text content
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use studyscout::providers::{Message, Role};
    ///
    /// let msg = Message::user("What is entropy?");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new model message
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}

/// Output format requested from the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// Strict machine-parseable JSON
    Json,
}

/// One generation request
///
/// Providers are stateless: conversational requests carry the full turn
/// history every time.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Optional system framing applied to the whole exchange
    pub system_instruction: Option<String>,
    /// Ordered turns, oldest first
    pub messages: Vec<Message>,
    /// Requested output format
    pub format: ResponseFormat,
}

impl GenerationRequest {
    /// Builds a single-turn request from a prompt
    ///
    /// # Examples
    ///
    /// ```
    /// use studyscout::providers::{GenerationRequest, ResponseFormat};
    ///
    /// let request = GenerationRequest::prompt("List three facts").json();
    /// assert_eq!(request.messages.len(), 1);
    /// assert_eq!(request.format, ResponseFormat::Json);
    /// ```
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            messages: vec![Message::user(prompt)],
            format: ResponseFormat::Text,
        }
    }

    /// Builds a conversational request from a system framing and history
    pub fn conversation(system_instruction: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system_instruction: Some(system_instruction.into()),
            messages,
            format: ResponseFormat::Text,
        }
    }

    /// Requests strict JSON output
    pub fn json(mut self) -> Self {
        self.format = ResponseFormat::Json;
        self
    }
}

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the AI provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use studyscout::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Response from a provider generation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    /// Generated text; `None` when the service produced no text part
    pub text: Option<String>,
    /// Token usage when the service reports it
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Creates a response carrying text and no usage
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage: None,
        }
    }

    /// Attaches token usage
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Generative-content backend
///
/// Implementations perform exactly one remote call per `generate` and report
/// every failure as an error; fallback policy lives in the gateway.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Runs one generation request
    ///
    /// # Errors
    ///
    /// Returns error if the transport fails, the service answers with a
    /// non-success status, or the response envelope cannot be parsed
    async fn generate(&self, request: &GenerationRequest) -> Result<CompletionResponse>;

    /// Name of the model requests are sent to
    fn model(&self) -> String;
}
