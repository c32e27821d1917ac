//! Built-in command classification for the chat REPL.
//!
//! [`classify`] decides whether a line is a built-in command, empty, or free
//! text for the model. It never fails and performs no I/O; the caller acts on
//! the returned [`Classification`].

use crate::constants::VERSION;

const HELP_TEXT: &str = "\
Available commands:
  help     - show this help
  version  - show version information
  status   - show current status
  debug    - toggle the browser debug console
  exit     - exit the program
  quit     - exit the program

Anything else is sent to the model.";

/// A built-in REPL command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Status,
    Exit,
    Quit,
    Debug,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Self::Help,
        Self::Version,
        Self::Status,
        Self::Exit,
        Self::Quit,
        Self::Debug,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Version => "version",
            Self::Status => "status",
            Self::Exit => "exit",
            Self::Quit => "quit",
            Self::Debug => "debug",
        }
    }

    /// Whether this command ends the session.
    pub fn is_exit(self) -> bool {
        matches!(self, Self::Exit | Self::Quit)
    }

    /// Canned text printed for informational commands.
    ///
    /// `None` for commands whose effect is a state change rather than output.
    pub fn response_text(self) -> Option<String> {
        match self {
            Self::Help => Some(HELP_TEXT.to_string()),
            Self::Version => Some(format!("version: {}", VERSION)),
            Self::Status => Some("status: running".to_string()),
            Self::Exit | Self::Quit | Self::Debug => None,
        }
    }
}

/// Result of classifying one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Blank line; re-prompt without dispatching.
    Empty,
    Command(Command),
    /// Trimmed input with its original casing.
    FreeText(&'a str),
}

impl Classification<'_> {
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command(_))
    }
}

/// Classifies a raw input line.
///
/// Surrounding whitespace is ignored and command names match case-insensitively.
pub fn classify(raw: &str) -> Classification<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Classification::Empty;
    }
    let normalized = trimmed.to_lowercase();
    match Command::ALL.into_iter().find(|c| c.name() == normalized) {
        Some(command) => Classification::Command(command),
        None => Classification::FreeText(trimmed),
    }
}
