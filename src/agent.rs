//! Agent façade: wires the generator into a session and picks how to run it.
//!
//! Interactive mode hands control to [`ChatLoop`]; one-shot mode runs a single
//! cycle through the same [`Responder`], so both behave the same way.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::browser::DebugConsole;
use crate::chat::{ChatLoop, Mode, Responder, RetryPolicy, RustylineReader};
use crate::output::{Renderer, StdoutRenderer};
use crate::provider::TextGenerator;

/// How the process should run, derived from CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMode {
    Interactive,
    OneShot(String),
    /// Neither flag given.
    Unspecified,
}

impl StartMode {
    /// `--interactive` wins when both flags are present.
    pub fn from_flags(interactive: bool, command: Option<String>) -> Self {
        match (interactive, command) {
            (true, _) => Self::Interactive,
            (false, Some(command)) => Self::OneShot(command),
            (false, None) => Self::Unspecified,
        }
    }
}

/// Process outcome, mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => ExitCode::SUCCESS,
            Exit::Failure => ExitCode::FAILURE,
        }
    }
}

/// Session settings that do not belong to the generator.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub retry: RetryPolicy,
    pub recording_path: PathBuf,
    pub mode: Mode,
}

pub struct Agent {
    generator: Arc<dyn TextGenerator>,
    options: SessionOptions,
}

impl Agent {
    pub fn new(generator: Arc<dyn TextGenerator>, options: SessionOptions) -> Self {
        Self { generator, options }
    }

    fn responder<O: Renderer>(&self, renderer: O) -> Responder<O> {
        Responder::new(
            Arc::clone(&self.generator),
            renderer,
            DebugConsole::new(self.options.recording_path.clone()),
            self.options.retry,
        )
        .with_mode(self.options.mode)
    }

    /// Runs the agent to completion in the given mode.
    pub async fn start(self, mode: StartMode) -> Result<Exit> {
        match mode {
            StartMode::Interactive => {
                info!(model = self.generator.model(), "starting interactive session");
                let reader = RustylineReader::new()?;
                let mut chat = ChatLoop::new(reader, self.responder(StdoutRenderer::new()));
                chat.run().await?;
                Ok(Exit::Success)
            }
            StartMode::OneShot(line) => {
                self.run_once(&line, StdoutRenderer::new()).await;
                Ok(Exit::Success)
            }
            StartMode::Unspecified => Ok(usage_failure()),
        }
    }

    /// Runs exactly one dispatch cycle for `line` and returns the renderer.
    pub async fn run_once<O: Renderer>(&self, line: &str, renderer: O) -> O {
        info!(command = line, "running one-shot command");
        let mut responder = self.responder(renderer);
        responder.handle_line(line).await;
        responder.into_renderer()
    }
}

/// Prints usage guidance to stderr for a run with no mode selected.
pub fn usage_failure() -> Exit {
    eprintln!(
        "Use --interactive to start a session, or --command \"<text>\" to run a single request.\n\
         Run `{} --help` for all options.",
        crate::constants::APP_NAME
    );
    Exit::Failure
}
