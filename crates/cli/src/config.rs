//! Configuration loading from monsoon.toml.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Extra launcher kinds: extension -> interpreter command.
    #[serde(default)]
    pub launchers: HashMap<String, String>,
}

/// Model backend configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Model to use.
    #[serde(default = "default_model")]
    pub model: String,

    /// Anthropic API key. Falls back to the ANTHROPIC_API_KEY environment
    /// variable when absent.
    pub api_key: Option<String>,

    /// Output token cap per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend.model, "claude-sonnet-4-20250514");
        assert_eq!(config.backend.max_tokens, 1000);
        assert!(config.backend.api_key.is_none());
        assert!(config.launchers.is_empty());
    }

    #[test]
    fn full_config_parses() {
        let config = Config::parse(
            r#"
            [backend]
            model = "claude-haiku-4-20250514"
            api_key = "sk-ant-api01-test"
            max_tokens = 512

            [launchers]
            rb = "ruby"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.model, "claude-haiku-4-20250514");
        assert_eq!(config.backend.max_tokens, 512);
        assert_eq!(config.launchers["rb"], "ruby");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = Config::parse("backend = nonsense").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
