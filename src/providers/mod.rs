//! Provider module for StudyScout
//!
//! This module contains the generative-content provider abstraction and
//! the Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{
    CompletionResponse, GenerationRequest, Message, Provider, ResponseFormat, Role, TokenUsage,
};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns `StudyScoutError::MissingCredentials` when no API key is
/// configured; callers treat that as the normal offline state.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    Ok(Box::new(GeminiProvider::new(config.gemini.clone())?))
}
