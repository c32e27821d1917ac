//! Struct definitions and serde defaults for browser-agent configuration.

use serde::{Deserialize, Serialize};

/// Root configuration, deserialized from `config.toml`.
///
/// Every field is optional so a project file only overrides what it sets.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Model identifier (e.g. `"deepseek-chat"`); unset means the built-in default.
    #[serde(default)]
    pub model: Option<String>,
    /// Custom base URL for the provider API (proxies, self-hosted gateways).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Completion token limit.
    #[serde(default)]
    pub max_tokens: Option<u64>,
    /// Request retry settings.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Browser debug console settings.
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Retry behavior for requests that fail before producing output.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct RetryConfig {
    /// Extra attempts after the first failure.
    pub max_retries: Option<u32>,
    /// Base backoff in milliseconds, multiplied by the attempt number.
    pub backoff_ms: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct BrowserConfig {
    /// Where the click recorder's JSON file lives.
    pub recording_path: Option<String>,
}
