//! Environment variable substitution, API key lookup and setting defaults.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use super::types::Config;
use crate::constants::{
    API_KEY_ENV, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TEMPERATURE, MAX_TOKENS,
    RECORDING_FILENAME,
};
use crate::error::ConfigError;

/// Reads the provider API key through `lookup` (normally `std::env::var`).
///
/// An empty value counts as missing.
pub fn resolve_api_key(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    match lookup(API_KEY_ENV) {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingEnvVar { name: API_KEY_ENV }),
    }
}

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ref mut model) = self.model {
            *model = Self::resolve_str(model, &lookup);
        }
        if let Some(ref mut url) = self.base_url {
            *url = Self::resolve_str(url, &lookup);
        }
        if let Some(ref mut path) = self.browser.recording_path {
            *path = Self::resolve_str(path, &lookup);
        }
    }

    /// Replace {env:VAR} with the variable's value, or nothing when unset.
    fn resolve_str(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find("{env:") {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            let var_name = &rest[start + 5..start + end];
            result.push_str(&rest[..start]);
            result.push_str(&lookup(var_name).unwrap_or_default());
            rest = &rest[start + end + 1..];
        }
        result.push_str(rest);
        result
    }

    /// Get the configured model name, or `None` when unset or blank.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.trim().is_empty())
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u64 {
        self.max_tokens.unwrap_or(MAX_TOKENS)
    }

    /// Extra attempts for requests that fail before any output.
    pub fn max_retries(&self) -> u32 {
        self.retry.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    /// Base delay between request attempts.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry.backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS))
    }

    /// Path of the click recording file, configured or under the data directory.
    pub fn recording_path(&self) -> Result<PathBuf> {
        match self.browser.recording_path.as_deref() {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(Self::data_dir()?.join(RECORDING_FILENAME)),
        }
    }
}
