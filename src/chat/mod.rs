//! Interactive chat REPL for browser-agent.
//!
//! [`ChatLoop`] reads one line at a time and hands it to a [`Responder`].
//! The next line is not read until the current cycle, including any streamed
//! response, has finished, so at most one request is ever in flight. No
//! conversation history is kept: each line is sent on its own.
//!
//! # Readline behavior
//!
//! - **Ctrl+C**: cancels current input, stays in REPL
//! - **Ctrl+D**: exits cleanly with "goodbye."

mod commands;
mod input;
mod responder;

#[allow(unused_imports)]
pub use commands::{classify, Classification, Command};
pub use input::{LineReader, ReadOutcome, RustylineReader};
pub use responder::{Flow, LoopState, Mode, Responder, RetryPolicy};

use anyhow::Result;
use colored::Colorize;

use crate::constants::PROMPT;
use crate::output::Renderer;

/// The interactive session: input reader plus dispatch cycle.
pub struct ChatLoop<I: LineReader, O: Renderer> {
    reader: I,
    responder: Responder<O>,
    closed: bool,
}

impl<I: LineReader, O: Renderer> ChatLoop<I, O> {
    pub fn new(reader: I, responder: Responder<O>) -> Self {
        Self {
            reader,
            responder,
            closed: false,
        }
    }

    pub fn responder(&self) -> &Responder<O> {
        &self.responder
    }

    pub fn into_responder(self) -> Responder<O> {
        self.responder
    }

    /// Runs the REPL until exit, end of input, or an input error.
    ///
    /// The reader is released on every path out of this function.
    pub async fn run(&mut self) -> Result<()> {
        self.responder.greet();
        let result = self.drive().await;
        self.shutdown();
        result
    }

    async fn drive(&mut self) -> Result<()> {
        loop {
            self.responder.enter(LoopState::Idle);
            let line = match self.reader.read_line(PROMPT)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    self.responder
                        .renderer_mut()
                        .render_notice(&"^C".dimmed().to_string());
                    continue;
                }
                ReadOutcome::Eof => {
                    self.responder.farewell();
                    return Ok(());
                }
            };

            if self.responder.handle_line(&line).await == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Terminates the session and releases the input. Idempotent.
    pub fn shutdown(&mut self) {
        self.responder.enter(LoopState::Terminated);
        if !self.closed {
            self.closed = true;
            self.reader.close();
        }
    }
}
