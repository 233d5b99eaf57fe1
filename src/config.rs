//! Configuration loading and management.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Validate(String),
}

/// Dispatcher policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Seconds an actor must wait between accepted invocations. 0 disables
    /// the cooldown entirely.
    #[serde(default)]
    pub cooldown_seconds: u64,

    /// Permission node that exempts an actor from the cooldown.
    #[serde(default = "default_exempt_permission")]
    pub cooldown_exempt_permission: String,

    /// Command usage lines per help page.
    #[serde(default = "default_help_page_size")]
    pub help_page_size: usize,

    /// Words that trigger help as the first or last invocation token.
    #[serde(default = "default_help_triggers")]
    pub help_triggers: Vec<String>,
}

fn default_exempt_permission() -> String {
    "commandeer.cooldown.exempt".to_string()
}

fn default_help_page_size() -> usize {
    8
}

fn default_help_triggers() -> Vec<String> {
    vec!["help".to_string(), "?".to_string()]
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 0,
            cooldown_exempt_permission: default_exempt_permission(),
            help_page_size: default_help_page_size(),
            help_triggers: default_help_triggers(),
        }
    }
}

impl DispatchConfig {
    /// Load from a TOML file and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.help_page_size == 0 {
            return Err(ConfigError::Validate(
                "help_page_size must be at least 1".to_string(),
            ));
        }
        if self.help_triggers.iter().any(|word| word.trim().is_empty()) {
            return Err(ConfigError::Validate(
                "help_triggers must not contain empty words".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured cooldown, or `None` when disabled.
    pub fn cooldown(&self) -> Option<chrono::Duration> {
        if self.cooldown_seconds == 0 {
            None
        } else {
            Some(chrono::Duration::seconds(self.cooldown_seconds as i64))
        }
    }

    /// Whether a token is one of the help trigger words.
    pub fn is_help_trigger(&self, token: &str) -> bool {
        self.help_triggers
            .iter()
            .any(|word| word.eq_ignore_ascii_case(token))
    }
}

/// Identity shown in the plugin summary and usage output.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// Plugin display name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Invocation prefix for usage rendering, typically `/`.
    pub command_prefix: String,
}

impl PluginInfo {
    /// Identity with the conventional `/` prefix.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            command_prefix: "/".to_string(),
        }
    }
}
