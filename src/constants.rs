//! Centralized constants for browser-agent.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "browser-agent";

/// Crate version reported by the `version` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prompt printed before each line of interactive input.
pub const PROMPT: &str = "browser-agent> ";

// --- Provider defaults ---

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Provider prefix accepted in `provider/model` shorthand.
pub const PROVIDER_NAME: &str = "deepseek";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

// --- Retry defaults ---

/// Number of extra attempts when a request fails before any output.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Base delay between attempts; attempt `n` waits `n` times this long.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

// --- Files ---

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "browser-agent.toml";

/// Click recording filename under the data directory.
pub const RECORDING_FILENAME: &str = "click-recording.json";
