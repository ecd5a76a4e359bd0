/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `search`     - Fetch and display learning resources
- `chat`       - Interactive tutor chat
- `summarize`  - Summarize a single resource
- `concepts`   - Print the concept map

Handlers receive a ready [`Gateway`](crate::gateway::Gateway) and never
decide between live and simulated results themselves.
*/

use crate::error::{Result, StudyScoutError};
use crate::gateway::Gateway;

// Special commands parser for the tutor chat loop
pub mod special_commands;

// Resource search command
pub mod search;

// Tutor chat command handler
pub mod chat {
    //! Interactive tutor chat handler.
    //!
    //! Runs a readline loop over a [`TutorChat`]. Regular input is sent to
    //! the tutor; `/topic` replaces the session.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::providers::Role;
    use crate::tutor::{ChatMessage, TutorChat};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive tutor chat on `topic`
    ///
    /// # Errors
    ///
    /// Returns `StudyScoutError::InvalidInput` for a blank topic, or an error
    /// if the line editor cannot be initialized.
    pub async fn run_chat(gateway: Gateway, topic: &str) -> Result<()> {
        if topic.trim().is_empty() {
            return Err(
                StudyScoutError::InvalidInput("chat topic must not be empty".to_string()).into(),
            );
        }
        tracing::info!("Starting tutor chat");

        let mut chat = TutorChat::new(gateway);
        chat.switch_topic(topic);

        let mut rl = DefaultEditor::new()?;
        print_welcome_banner(&chat);

        loop {
            let prompt = format!("[{}] >> ", chat.topic().unwrap_or_default().cyan());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::SwitchTopic(new_topic)) => {
                            chat.switch_topic(&new_topic);
                            print_transcript(chat.transcript());
                            continue;
                        }
                        Ok(SpecialCommand::ShowHistory) => {
                            print_transcript(chat.transcript());
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    }

                    let Some(turn) = chat.begin(trimmed) else {
                        continue;
                    };
                    println!("{}", "Thinking...".dimmed());
                    let reply = turn.resolve(chat.gateway()).await;
                    if chat.accept(&turn, reply.clone()) {
                        println!("\n{}\n", reply);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome_banner(chat: &TutorChat) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              StudyScout AI Tutor - Welcome!                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        if chat.session().is_none() {
            println!(
                "{}\n",
                "Demo mode: no API key configured, replies are simulated.".yellow()
            );
        }
        print_transcript(chat.transcript());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    fn print_transcript(messages: &[ChatMessage]) {
        for message in messages {
            let label = match message.role {
                Role::User => "You".green().bold(),
                Role::Model => "Tutor".blue().bold(),
            };
            println!(
                "{} {} {}\n",
                message.timestamp.format("%H:%M").to_string().dimmed(),
                label,
                message.content
            );
        }
    }
}

// Resource summary command handler
pub mod summarize {
    //! One-shot resource summary.

    use super::*;

    /// Summarize a resource and print one bullet per line
    ///
    /// # Errors
    ///
    /// Returns `StudyScoutError::InvalidInput` when the title is blank
    pub async fn run_summarize(gateway: &Gateway, title: &str, context: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(
                StudyScoutError::InvalidInput("resource title must not be empty".to_string())
                    .into(),
            );
        }
        let bullets = gateway.summarize_resource(title.trim(), context).await;
        println!("{}", format_bullets(&bullets));
        Ok(())
    }

    pub(crate) fn format_bullets(bullets: &[String]) -> String {
        bullets
            .iter()
            .map(|b| format!("  - {}", b))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// Concept map command handler
pub mod concepts {
    //! Prints the built-in concept map.

    use super::*;
    use crate::concept_map::default_concept_map;

    /// Print the concept map as an indented tree or as JSON
    ///
    /// # Errors
    ///
    /// Returns `StudyScoutError::Serialization` if JSON output fails
    pub fn run_concepts(json: bool) -> Result<()> {
        let map = default_concept_map();
        if json {
            let out = serde_json::to_string_pretty(&map).map_err(StudyScoutError::Serialization)?;
            println!("{}", out);
        } else {
            println!("\nConcept Map\n");
            println!("{}\n", map.render());
        }
        Ok(())
    }
}
