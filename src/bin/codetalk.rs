//! Terminal REPL for conversing with an ingested code repository.
//!
//! The binary is a thin presentation layer over the codetalk library: it
//! relays input to the session controller and renders whatever state the
//! controller settles on. Markdown in answers is printed verbatim.
//!
//! # Usage
//!
//! ```bash
//! # Against the default local backend
//! codetalk
//!
//! # Against another backend, with a shorter timeout
//! codetalk --base-url http://backend:9000 --timeout 30
//!
//! # Disable colors (useful for piping output)
//! codetalk --no-color
//! ```
//!
//! # Commands
//!
//! While conversing, you can use slash commands:
//! - `/new` - Reset the session and pick a new repository
//! - `/sources` - List the files the last answer cited
//! - `/status` - Show repository, file count, and message count
//! - `/help` - Show available commands
//! - `/quit` - Exit

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use codetalk::repl::{ReplArgs, ReplCommand, ReplConfig, help_text, parse_command};
use codetalk::{
    Message, MessageRole, RagClient, Screen, ScreenSink, SessionController, SessionStatus,
    ViewCoordinator,
};

/// ANSI escape code for dim text (used for source listings).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for red text (used for failure notices).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Prints the one-way paging effect when the session changes screens.
struct PagingSink;

impl ScreenSink for PagingSink {
    fn screen_changed(&self, screen: Screen) {
        match screen {
            Screen::Conversation => println!("\n----- conversation -----\n"),
            Screen::Landing => println!("\n----- new session -----\n"),
        }
    }
}

fn print_notice(use_color: bool, notice: &str) {
    if use_color {
        eprintln!("{ANSI_RED}{notice}{ANSI_RESET}");
    } else {
        eprintln!("{notice}");
    }
}

/// Print an assistant message: content verbatim, then its cited files with
/// repeats dropped (the backend gives no uniqueness guarantee).
fn print_assistant(use_color: bool, message: &Message) {
    println!("{}", message.content);
    let Some(sources) = &message.sources else {
        return;
    };
    let mut seen = std::collections::HashSet::new();
    let paths: Vec<&str> = sources
        .iter()
        .map(|s| s.file_path.as_str())
        .filter(|p| seen.insert(*p))
        .collect();
    if paths.is_empty() {
        return;
    }
    if use_color {
        println!("{ANSI_DIM}sources: {}{ANSI_RESET}", paths.join(", "));
    } else {
        println!("sources: {}", paths.join(", "));
    }
}

fn print_last_assistant(use_color: bool, controller: &SessionController) {
    if let Some(message) = controller
        .messages()
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant)
    {
        print_assistant(use_color, message);
    }
}

/// Main entry point for the codetalk REPL.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ReplArgs::from_command_line_relaxed("codetalk [OPTIONS]");
    let config = ReplConfig::from(args);
    let use_color = config.use_color;

    let client = RagClient::with_options(config.base_url, config.timeout)?;
    println!("codetalk (backend: {})", client.base_url());
    println!("Paste a repository URL to begin. /help for commands, /quit to exit.\n");

    let controller = Arc::new(SessionController::new(Arc::new(client)));
    let coordinator = Arc::new(ViewCoordinator::new(Arc::new(PagingSink)));
    controller.subscribe(coordinator.clone());

    let mut rl = DefaultEditor::new()?;

    loop {
        let landing = coordinator.current() == Screen::Landing;
        let prompt = if landing { "Repository URL: " } else { "You: " };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => return Err(Box::new(err) as Box<dyn std::error::Error>),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        if let Some(command) = parse_command(line) {
            match command {
                ReplCommand::Quit => {
                    println!("Goodbye!");
                    break;
                }
                ReplCommand::Help => {
                    for help_line in help_text().lines() {
                        println!("    {}", help_line);
                    }
                }
                ReplCommand::New => {
                    controller.reset().await;
                }
                ReplCommand::Status => match controller.status() {
                    SessionStatus::Idle | SessionStatus::Ingesting => {
                        println!("No repository ingested yet.");
                    }
                    _ => {
                        println!(
                            "repository: {} ({} files, {} messages)",
                            controller.repository(),
                            controller.file_count(),
                            controller.message_count()
                        );
                    }
                },
                ReplCommand::Sources => {
                    print_last_assistant(use_color, &controller);
                }
                ReplCommand::Invalid(reason) => {
                    print_notice(use_color, &reason);
                }
            }
            continue;
        }

        if landing {
            println!("Ingesting...");
            if !controller.start_ingestion(line).await {
                print_notice(use_color, "Enter a repository URL.");
                continue;
            }
            match controller.status() {
                SessionStatus::Ready => {
                    print_last_assistant(use_color, &controller);
                }
                _ => {
                    if let Some(reason) = controller.last_ingest_error() {
                        print_notice(use_color, &reason);
                    }
                }
            }
        } else {
            if !controller.send_message(line).await {
                continue;
            }
            print_last_assistant(use_color, &controller);
        }
    }

    Ok(())
}
