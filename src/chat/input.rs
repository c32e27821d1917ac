//! Line input for the chat REPL.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// What one read from the terminal produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl+C: the current line was abandoned.
    Interrupted,
    /// Ctrl+D or closed input.
    Eof,
}

/// Source of interactive input lines.
pub trait LineReader {
    /// Shows `prompt` and blocks until a line (or an end condition) arrives.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Releases the input. Further calls are no-ops and reads report EOF.
    fn close(&mut self);
}

/// Terminal input via [`rustyline`], with in-memory line history.
pub struct RustylineReader {
    editor: Option<DefaultEditor>,
}

impl RustylineReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: Some(DefaultEditor::new()?),
        })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(ReadOutcome::Eof);
        };
        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) {
        if self.editor.take().is_some() {
            debug!("terminal input released");
        }
    }
}
