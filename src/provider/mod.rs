//! Text generation backend for browser-agent.
//!
//! [`TextGenerator`] is the narrow seam the chat loop talks to. [`Provider`]
//! implements it on top of rig-core's DeepSeek client; tests substitute a
//! scripted generator.

mod client;
mod resolve;

pub use client::Provider;
pub use resolve::resolve_model;
#[allow(unused_imports)]
pub use resolve::GenerationSettings;

use futures::stream::BoxStream;

use crate::error::GenerationError;
use crate::message::Message;

/// Lazy, single-pass sequence of response fragments in arrival order.
///
/// Ends when the provider signals completion. An `Err` item means the request
/// could not be established or the stream broke; nothing follows it.
pub type FragmentStream = BoxStream<'static, Result<String, GenerationError>>;

/// Anything that can answer a conversation with text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `messages` and waits for the complete response.
    async fn ask(&self, messages: &[Message]) -> Result<String, GenerationError>;

    /// Sends `messages` and streams the response.
    ///
    /// No network activity happens until the returned stream is first polled.
    fn stream_ask(&self, messages: &[Message]) -> FragmentStream;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
