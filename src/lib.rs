//! StudyScout - learning resource search and AI tutor library
//!
//! This library provides the resource acquisition gateway behind StudyScout:
//! it asks a generative model for curated learning resources, tutor replies,
//! and summaries, and falls back to locally generated results whenever the
//! model is unavailable or its output cannot be trusted.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `gateway`: Total entry points for search, chat, and summaries
//! - `fallback`: Deterministic offline resource batches
//! - `prompts`: Prompt text and decoding of model output
//! - `providers`: Generative service abstraction and the Gemini client
//! - `tutor`: Topic-scoped sessions and caller-side chat state
//! - `resource`: Learning resource records and filters
//! - `concept_map`: Static concept tree
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use studyscout::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let gateway = Gateway::from_config(&config);
//!     for resource in gateway.fetch_resources("Quantum Physics").await {
//!         println!("{} ({})", resource.title, resource.resource_type);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod concept_map;
pub mod config;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod prompts;
pub mod providers;
pub mod resource;
pub mod tutor;

// Re-export commonly used types
pub use concept_map::{default_concept_map, ConceptNode};
pub use config::Config;
pub use error::{DecodeError, Result, StudyScoutError};
pub use gateway::Gateway;
pub use resource::{Difficulty, LearningResource, ResourceFilter, ResourceType};
pub use tutor::{ChatMessage, PendingTurn, SessionHandle, TutorChat};

#[cfg(test)]
pub mod test_utils;
