//! Configuration types and path resolution for browser-agent.
//!
//! Settings live as TOML at the platform's XDG config path
//! (e.g. `~/.config/browser-agent/config.toml` on Linux), optionally overlaid
//! by a `browser-agent.toml` in the current project. Neither file is required.
//! The API key is never read from these files; it comes from the environment.

mod loader;
mod paths;
mod resolve;
mod types;

pub use resolve::resolve_api_key;
pub use types::Config;
#[allow(unused_imports)]
pub use types::{BrowserConfig, RetryConfig};

use anyhow::Result;
use tracing::debug;

impl Config {
    /// Load config with precedence: project > global > defaults.
    pub fn load() -> Result<Self> {
        let global = match Self::load_from(&Self::config_path()?)? {
            Some(config) => config,
            None => Self::default(),
        };
        let project = match Self::find_project(&std::env::current_dir()?) {
            Some(path) => Self::load_from(&path)?,
            None => None,
        };

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions(|name| std::env::var(name).ok());
        debug!(model = ?config.model, "configuration loaded");
        Ok(config)
    }
}
