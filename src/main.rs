//! Entry point for browser-agent, a terminal chat client for an LLM with a
//! browser automation debug console.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! sets up logging and hands control to the [`agent`].

mod agent;
mod browser;
mod chat;
mod cli;
mod config;
mod constants;
mod error;
mod message;
mod output;
mod provider;

#[cfg(test)]
mod testing;

use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Runs the browser-agent CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and runs it via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    init_logging(cli.verbose);

    match cli::run(cli).await {
        Ok(exit) => exit.into(),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never mix with streamed responses.
fn init_logging(verbose: bool) {
    let default = if verbose { "browser_agent=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
