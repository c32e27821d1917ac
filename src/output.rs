//! Output rendering abstraction for browser-agent.
//!
//! Defines the [`Renderer`] trait that decouples the chat loop from the
//! display layer. [`StdoutRenderer`] prints to the terminal; tests capture
//! output through their own implementation.

use colored::Colorize;
use std::io::{self, Write};

/// Trait for rendering everything the chat loop shows the user.
pub trait Renderer {
    /// Render a complete line of text (banners, command responses).
    fn render_notice(&mut self, text: &str);

    /// Render a single response fragment as it arrives, verbatim.
    fn render_fragment(&mut self, fragment: &str);

    /// Called when a streamed response is complete.
    fn render_done(&mut self);

    /// Called when a request or stream fails.
    fn render_error(&mut self, err: &str);

    /// Blank line printed between dispatch cycles.
    fn render_separator(&mut self);
}

/// Renders chat output directly to stdout, errors to stderr.
///
/// Each fragment is printed immediately with an explicit flush so the user
/// sees a "typing" effect.
#[derive(Debug, Default)]
pub struct StdoutRenderer {
    fragment_count: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for StdoutRenderer {
    fn render_notice(&mut self, text: &str) {
        println!("{}", text);
    }

    fn render_fragment(&mut self, fragment: &str) {
        print!("{}", fragment);
        // Flush immediately so each fragment appears as it arrives
        io::stdout().flush().ok();
        self.fragment_count += 1;
    }

    fn render_done(&mut self) {
        println!(); // Final newline after stream ends
        tracing::debug!(fragments = self.fragment_count, "response complete");
        self.fragment_count = 0;
    }

    fn render_error(&mut self, err: &str) {
        eprintln!("{} {}", "error:".red().bold(), err);
    }

    fn render_separator(&mut self) {
        println!();
    }
}
