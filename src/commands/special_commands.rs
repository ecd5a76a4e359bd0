//! Special commands parser for interactive tutor chat
//!
//! Special commands let the user change topic, review the transcript, show
//! help, or leave the session without sending text to the tutor.
//!
//! Commands are prefixed with `/` and are case-insensitive. The argument to
//! `/topic` keeps its original casing.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during tutor chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a fresh session on a new topic
    SwitchTopic(String),

    /// Print the transcript for the current topic
    ShowHistory,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; the input goes to the tutor
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not
/// a valid command, and `CommandError::MissingArgument` for `/topic` without
/// a topic.
///
/// # Examples
///
/// ```
/// use studyscout::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/topic Organic Chemistry").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchTopic("Organic Chemistry".to_string()));
///
/// let cmd = parse_special_command("explain entropy").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower, ""),
    };

    match name.as_str() {
        "/topic" if arg.is_empty() => Err(CommandError::MissingArgument {
            command: "/topic".to_string(),
            usage: "/topic <new topic>".to_string(),
        }),
        "/topic" => Ok(SpecialCommand::SwitchTopic(arg.to_string())),
        "/history" => Ok(SpecialCommand::ShowHistory),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Display help for the special commands
pub fn print_help() {
    println!(
        r#"
Tutor Chat Commands
===================

  /topic <name>   - Start over with a new topic
  /history        - Show the conversation so far
  /help           - Show this help message
  /?              - Same as /help
  /exit           - Leave the chat
  exit, quit      - Same as /exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the tutor
  - Changing topic discards the previous conversation
"#
    );
}
