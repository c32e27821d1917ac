//! File loading and merging for browser-agent configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{BrowserConfig, Config, RetryConfig};

impl Config {
    /// Reads a config file, returning `None` when it does not exist.
    pub(super) fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(Some(config))
    }

    /// Look for browser-agent.toml in `start`, then walk up to git root.
    pub(super) fn find_project(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                return None;
            }
        }
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: project.model.or(global.model),
            base_url: project.base_url.or(global.base_url),
            temperature: project.temperature.or(global.temperature),
            max_tokens: project.max_tokens.or(global.max_tokens),
            retry: RetryConfig {
                max_retries: project.retry.max_retries.or(global.retry.max_retries),
                backoff_ms: project.retry.backoff_ms.or(global.retry.backoff_ms),
            },
            browser: BrowserConfig {
                recording_path: project
                    .browser
                    .recording_path
                    .or(global.browser.recording_path),
            },
        }
    }
}
