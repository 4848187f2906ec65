//! Slash command parsing for the REPL.
//!
//! Commands control the session locally and are never sent to the backend.

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Reset the session and return to the landing screen.
    New,

    /// Re-list the citations of the last answer.
    Sources,

    /// Show repository, file count, and message count.
    Status,

    /// Display help information.
    Help,

    /// Exit the REPL.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ReplCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use codetalk::repl::{ReplCommand, parse_command};
/// assert_eq!(parse_command("/quit"), Some(ReplCommand::Quit));
/// assert_eq!(parse_command("What does main() do?"), None);
/// ```
pub fn parse_command(input: &str) -> Option<ReplCommand> {
    let input = input.trim();
    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Some(ReplCommand::Invalid(format!(
            "{command} takes no arguments"
        )));
    }

    match command {
        "/new" => Some(ReplCommand::New),
        "/sources" => Some(ReplCommand::Sources),
        "/status" => Some(ReplCommand::Status),
        "/help" => Some(ReplCommand::Help),
        "/quit" | "/exit" => Some(ReplCommand::Quit),
        _ => Some(ReplCommand::Invalid(format!(
            "unknown command {command}; try /help"
        ))),
    }
}

/// Help text listing the available commands.
pub fn help_text() -> &'static str {
    "/new      Reset the session and pick a new repository\n\
     /sources  List the files the last answer cited\n\
     /status   Show repository, file count, and message count\n\
     /help     Show this help\n\
     /quit     Exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("what is /delete for?"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn known_commands_parse() {
        assert_eq!(parse_command("/new"), Some(ReplCommand::New));
        assert_eq!(parse_command("/sources"), Some(ReplCommand::Sources));
        assert_eq!(parse_command("/status"), Some(ReplCommand::Status));
        assert_eq!(parse_command("/help"), Some(ReplCommand::Help));
        assert_eq!(parse_command("/quit"), Some(ReplCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ReplCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ReplCommand::Quit));
    }

    #[test]
    fn unknown_command_is_invalid() {
        match parse_command("/frobnicate") {
            Some(ReplCommand::Invalid(msg)) => assert!(msg.contains("/frobnicate")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn trailing_arguments_are_invalid() {
        match parse_command("/new now") {
            Some(ReplCommand::Invalid(msg)) => assert!(msg.contains("/new")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn help_text_mentions_every_command() {
        let help = help_text();
        for command in ["/new", "/sources", "/status", "/help", "/quit"] {
            assert!(help.contains(command), "missing {command}");
        }
    }
}
