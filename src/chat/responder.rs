//! One dispatch cycle: classify a line, then answer it.
//!
//! [`Responder`] is shared by the interactive loop and one-shot mode so both
//! paths behave identically. It owns the session's only mutable state: the
//! current [`Mode`] and [`LoopState`].

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use futures::StreamExt;
use tracing::{debug, warn};

use super::commands::{classify, Classification, Command};
use crate::browser::DebugConsole;
use crate::config::Config;
use crate::message::Message;
use crate::output::Renderer;
use crate::provider::TextGenerator;

/// Where the session is in its read-eval-print cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for input.
    Idle,
    /// Classifying a line.
    Dispatching,
    /// Waiting on or consuming a response.
    Responding,
    Terminated,
}

/// Which handler free text goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Debug,
}

/// Whether the session continues after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Bounded retry for requests that fail before showing any output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries(),
            backoff: config.retry_backoff(),
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// Runs dispatch cycles against a text generator and renders the results.
pub struct Responder<O: Renderer> {
    generator: Arc<dyn TextGenerator>,
    renderer: O,
    console: DebugConsole,
    retry: RetryPolicy,
    mode: Mode,
    state: LoopState,
}

impl<O: Renderer> Responder<O> {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        renderer: O,
        console: DebugConsole,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            generator,
            renderer,
            console,
            retry,
            mode: Mode::Normal,
            state: LoopState::Idle,
        }
    }

    /// Starts the session in `mode` instead of [`Mode::Normal`].
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn renderer_mut(&mut self) -> &mut O {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> O {
        self.renderer
    }

    pub(super) fn enter(&mut self, state: LoopState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "state transition");
            self.state = state;
        }
    }

    /// Prints the interactive banner.
    pub fn greet(&mut self) {
        self.renderer.render_notice(&format!(
            "{} [model: {}]",
            crate::constants::APP_NAME.bold().cyan(),
            self.generator.model().yellow(),
        ));
        self.renderer
            .render_notice("Type \"help\" for commands, \"exit\" to quit.");
        self.renderer
            .render_notice("Anything else is sent to the model.");
        if self.mode == Mode::Debug {
            self.announce_mode();
        }
        self.renderer.render_separator();
    }

    /// Prints the farewell line and terminates the session.
    pub fn farewell(&mut self) {
        self.renderer.render_notice(&"goodbye.".dimmed().to_string());
        self.enter(LoopState::Terminated);
    }

    /// Runs one dispatch cycle for `raw`.
    ///
    /// Generation failures are rendered here and never escape; only an exit
    /// command ends the session.
    pub async fn handle_line(&mut self, raw: &str) -> Flow {
        if self.state == LoopState::Terminated {
            return Flow::Exit;
        }
        self.enter(LoopState::Dispatching);

        let flow = match classify(raw) {
            Classification::Empty => {
                self.enter(LoopState::Idle);
                return Flow::Continue;
            }
            Classification::Command(command) => self.run_command(command),
            Classification::FreeText(text) => {
                self.respond(text).await;
                Flow::Continue
            }
        };

        if flow == Flow::Continue {
            self.renderer.render_separator();
            self.enter(LoopState::Idle);
        }
        flow
    }

    fn run_command(&mut self, command: Command) -> Flow {
        debug!(command = command.name(), "built-in command");
        if command.is_exit() {
            self.farewell();
            return Flow::Exit;
        }
        if command == Command::Debug {
            self.mode = match self.mode {
                Mode::Normal => Mode::Debug,
                Mode::Debug => Mode::Normal,
            };
            self.announce_mode();
            return Flow::Continue;
        }
        if let Some(text) = command.response_text() {
            self.renderer.render_notice(&text);
        }
        Flow::Continue
    }

    fn announce_mode(&mut self) {
        match self.mode {
            Mode::Debug => {
                self.renderer.render_notice(&format!(
                    "{} input now goes to the browser debug console.",
                    "debug mode on:".yellow().bold()
                ));
                self.renderer.render_notice(&format!(
                    "Type \"capabilities\" to see what it can do, \"debug\" to leave. Recording file: {}",
                    self.console.recording_path().display()
                ));
            }
            Mode::Normal => {
                self.renderer
                    .render_notice(&"debug mode off: input goes to the model.".dimmed().to_string());
            }
        }
    }

    async fn respond(&mut self, text: &str) {
        self.enter(LoopState::Responding);
        match self.mode {
            Mode::Normal => self.stream_reply(text).await,
            Mode::Debug => {
                self.console
                    .handle(text, self.generator.as_ref(), &mut self.renderer)
                    .await
            }
        }
    }

    /// Streams the model's answer to `text`, one fragment at a time.
    ///
    /// A failure before the first visible fragment is retried per the
    /// [`RetryPolicy`]; after output has started it is reported as-is.
    async fn stream_reply(&mut self, text: &str) {
        let messages = [Message::user(text)];
        let mut attempt = 0;

        loop {
            let mut stream = self.generator.stream_ask(&messages);
            let mut shown = 0usize;
            let mut failure = None;

            while let Some(item) = stream.next().await {
                match item {
                    Ok(fragment) => {
                        if !fragment.is_empty() {
                            shown += 1;
                        }
                        self.renderer.render_fragment(&fragment);
                    }
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }
            }

            let Some(err) = failure else {
                self.renderer.render_done();
                return;
            };

            if shown == 0 && attempt < self.retry.max_retries {
                attempt += 1;
                warn!(attempt, error = %err, "request failed before output, retrying");
                tokio::time::sleep(self.retry.delay(attempt)).await;
                continue;
            }

            if shown > 0 {
                self.renderer.render_done();
            }
            self.renderer.render_error(&err.to_string());
            return;
        }
    }
}
