//! Model resolution logic for browser-agent.
//!
//! Resolves which model and sampling settings to use based on CLI flags,
//! config file, and hardcoded defaults. Supports `deepseek/model` shorthand.

use anyhow::Result;

use crate::config::Config;
use crate::constants::{DEFAULT_MODEL, PROVIDER_NAME};
use crate::error::ConfigError;

/// Everything a request needs besides the conversation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u64,
}

/// Resolve which model to use and pair it with the configured sampling settings.
/// Priority: CLI flag > config.toml > default.
///
/// Accepts these formats:
///   --model deepseek-reasoner
///   --model deepseek/deepseek-reasoner  (provider prefix is checked and stripped)
///   (nothing)  (uses config.toml, then the default model)
pub fn resolve_model(cli_model: Option<&str>, config: &Config) -> Result<GenerationSettings> {
    let requested = cli_model
        .filter(|m| !m.trim().is_empty())
        .or(config.model_name())
        .unwrap_or(DEFAULT_MODEL);

    let model = match requested.split_once('/') {
        Some((prov, model)) if prov.eq_ignore_ascii_case(PROVIDER_NAME) => model,
        Some((prov, _)) => return Err(ConfigError::UnsupportedProvider(prov.to_string()).into()),
        None => requested,
    };
    // A bare `deepseek/` names no model.
    let model = match model.trim() {
        "" => DEFAULT_MODEL,
        model => model,
    };

    Ok(GenerationSettings {
        model: model.to_string(),
        temperature: config.temperature(),
        max_tokens: config.max_tokens(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_when_nothing_set() {
        let settings = resolve_model(None, &Config::default()).unwrap();
        assert_eq!(settings.model, "deepseek-chat");
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.max_tokens, 4096);
    }

    #[test]
    fn test_cli_flag_beats_config() {
        let config = Config {
            model: Some("deepseek-reasoner".to_string()),
            ..Config::default()
        };
        assert_eq!(
            resolve_model(None, &config).unwrap().model,
            "deepseek-reasoner"
        );
        assert_eq!(
            resolve_model(Some("deepseek-coder"), &config).unwrap().model,
            "deepseek-coder"
        );
    }

    #[test]
    fn test_provider_prefix_is_stripped() {
        let settings = resolve_model(Some("DeepSeek/deepseek-reasoner"), &Config::default()).unwrap();
        assert_eq!(settings.model, "deepseek-reasoner");
    }

    #[test]
    fn test_bare_provider_prefix_selects_default_model() {
        let settings = resolve_model(Some("deepseek/"), &Config::default()).unwrap();
        assert_eq!(settings.model, "deepseek-chat");

        let config = Config {
            model: Some("deepseek/ ".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_model(None, &config).unwrap().model, "deepseek-chat");
    }

    #[test]
    fn test_foreign_provider_prefix_is_rejected() {
        let err = resolve_model(Some("openai/gpt-4.1"), &Config::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnsupportedProvider("openai".to_string()))
        );
    }
}
