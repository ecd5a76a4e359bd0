//! Command-line interface definition for StudyScout
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for resource search, tutor chat, and summaries.

use crate::resource::{Difficulty, ResourceType};
use clap::{Parser, Subcommand};

/// StudyScout - find learning resources and study with an AI tutor
///
/// Works offline with simulated results when no API key is configured.
#[derive(Parser, Debug, Clone)]
#[command(name = "studyscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Ignore any configured API key and use simulated responses
    #[arg(long)]
    pub offline: bool,

    /// Override the Gemini model from config
    #[arg(short, long)]
    pub model: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for StudyScout
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Search for learning resources on a topic
    Search {
        /// Topic to search for
        topic: String,

        /// Only show resources of this type (video, article, pdf)
        #[arg(short = 't', long = "type")]
        resource_type: Option<ResourceType>,

        /// Only show resources at this difficulty
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Print the batch as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive tutor chat on a topic
    Chat {
        /// Topic to study
        topic: String,
    },

    /// Summarize a resource into short bullet points
    Summarize {
        /// Resource title
        #[arg(long)]
        title: String,

        /// Context the summary is based on
        #[arg(long)]
        context: String,
    },

    /// Show the concept map
    Concepts {
        /// Print the map as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            offline: false,
            model: None,
            command: Commands::Concepts { json: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(!cli.offline);
        assert!(matches!(cli.command, Commands::Concepts { json: false }));
    }

    #[test]
    fn test_cli_parse_search_with_filters() {
        let cli = Cli::try_parse_from([
            "studyscout",
            "search",
            "quantum physics",
            "--type",
            "PDF",
            "--difficulty",
            "advanced",
            "--json",
        ])
        .unwrap();
        if let Commands::Search {
            topic,
            resource_type,
            difficulty,
            json,
        } = cli.command
        {
            assert_eq!(topic, "quantum physics");
            assert_eq!(resource_type, Some(ResourceType::Pdf));
            assert_eq!(difficulty, Some(Difficulty::Advanced));
            assert!(json);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_cli_parse_search_rejects_unknown_type() {
        let cli = Cli::try_parse_from(["studyscout", "search", "x", "--type", "podcast"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_chat_requires_topic() {
        assert!(Cli::try_parse_from(["studyscout", "chat"]).is_err());
        let cli = Cli::try_parse_from(["studyscout", "chat", "Biology"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { ref topic } if topic == "Biology"));
    }

    #[test]
    fn test_cli_parse_summarize() {
        let cli = Cli::try_parse_from([
            "studyscout",
            "summarize",
            "--title",
            "Attention Is All You Need",
            "--context",
            "Transformer paper",
        ])
        .unwrap();
        if let Commands::Summarize { title, context } = cli.command {
            assert_eq!(title, "Attention Is All You Need");
            assert_eq!(context, "Transformer paper");
        } else {
            panic!("Expected Summarize command");
        }
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "studyscout",
            "--offline",
            "-v",
            "--model",
            "gemini-2.0-flash",
            "concepts",
        ])
        .unwrap();
        assert!(cli.offline);
        assert!(cli.verbose);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.0-flash"));
    }
}
