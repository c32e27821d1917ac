//! Typed errors for the failure kinds callers branch on.
//!
//! Everything else travels as [`anyhow::Error`] with context attached.

use thiserror::Error;

/// Startup configuration problems. Fatal: the process exits before any prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {name} is not set")]
    MissingEnvVar { name: &'static str },
    #[error("unsupported provider '{0}', only deepseek is available")]
    UnsupportedProvider(String),
}

/// A failed call to the text generation backend.
///
/// Recovered at the cycle boundary; the session always continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("conversation is empty")]
    EmptyConversation,
    #[error("request failed: {0}")]
    Request(String),
    #[error("stream failed: {0}")]
    Stream(String),
}
