//! Command-line interface definition and dispatch for browser-agent.
//!
//! Uses [`clap`] derive macros. Startup checks run in a fixed order: the API
//! key is verified before any configuration is read or any prompt is shown.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

use crate::agent::{self, Agent, Exit, SessionOptions, StartMode};
use crate::chat::{Mode, RetryPolicy};
use crate::config::{self, Config};
use crate::constants::API_KEY_ENV;
use crate::provider::{self, Provider};

/// Top-level CLI structure for browser-agent.
#[derive(Parser, Debug)]
#[command(
    name = "browser-agent",
    version,
    about = "Chat with an LLM from the terminal, with a browser automation debug console"
)]
pub struct Cli {
    /// Start an interactive chat session
    #[arg(short, long)]
    pub interactive: bool,

    /// Run a single command or prompt, then exit
    #[arg(short, long, value_name = "TEXT")]
    pub command: Option<String>,

    /// Model to use (overrides config; accepts deepseek/<model>)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Start in browser debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn start_mode(&self) -> StartMode {
        StartMode::from_flags(self.interactive, self.command.clone())
    }

    fn session_mode(&self) -> Mode {
        if self.debug {
            Mode::Debug
        } else {
            Mode::Normal
        }
    }
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Runs the CLI against the process environment.
pub async fn run(cli: Cli) -> Result<Exit> {
    run_with_env(cli, |name| std::env::var(name).ok()).await
}

/// Runs the CLI with `lookup` standing in for environment variable access.
pub async fn run_with_env(cli: Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Exit> {
    let api_key = match config::resolve_api_key(&lookup) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            eprintln!(
                "{}",
                format!("hint: export {}='your-api-key'", API_KEY_ENV).dimmed()
            );
            return Ok(Exit::Failure);
        }
    };

    let start_mode = cli.start_mode();
    if start_mode == StartMode::Unspecified {
        return Ok(agent::usage_failure());
    }

    let config = Config::load()?;
    let settings = provider::resolve_model(cli.model.as_deref(), &config)?;
    debug!(model = %settings.model, "resolved generation settings");

    let generator = Provider::new(&api_key, config.base_url.as_deref(), settings)?;
    let options = SessionOptions {
        retry: RetryPolicy::from_config(&config),
        recording_path: config.recording_path()?,
        mode: cli.session_mode(),
    };

    Agent::new(Arc::new(generator), options).start(start_mode).await
}
