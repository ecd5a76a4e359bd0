//! Error types for StudyScout
//!
//! This module defines the error types used throughout the crate,
//! using `thiserror` for ergonomic error handling. None of these errors
//! cross the [`Gateway`](crate::gateway::Gateway) boundary: the gateway logs
//! them and substitutes its fallback value instead.

use thiserror::Error;

/// Main error type for StudyScout operations
///
/// Covers configuration loading, provider interactions, and decoding of
/// untrusted model output.
#[derive(Error, Debug)]
pub enum StudyScoutError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, unexpected status codes, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Rejected user input such as a blank topic
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Model output could not be turned into trusted records
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure to decode structured model output
///
/// Returned by [`decode_resources`](crate::prompts::resource_prompt::decode_resources)
/// and [`decode_summary`](crate::prompts::summary_prompt::decode_summary).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The service returned no text at all
    #[error("response contained no text")]
    EmptyResponse,

    /// No JSON array could be located in the text
    #[error("no JSON array found in response")]
    NoArray,

    /// The text was not valid JSON of the expected shape
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The array decoded but held no records
    #[error("response held an empty batch")]
    EmptyBatch,

    /// A record violated the resource schema
    #[error("record {index}: {reason}")]
    SchemaViolation {
        /// Position of the offending record in the batch
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Result type alias for StudyScout operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
