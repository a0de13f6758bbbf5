use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecognizerConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default)]
    pub scripted: Option<ScriptedConfig>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            scripted: None,
        }
    }
}

impl RecognizerConfig {
    /// Engine-specific options handed to the recognizer's `initialize`.
    pub fn engine_options(&self) -> toml::Value {
        let options = match self.engine.as_str() {
            "scripted" => self
                .scripted
                .as_ref()
                .and_then(|cfg| toml::Value::try_from(cfg).ok()),
            _ => None,
        };
        options.unwrap_or_else(|| toml::Value::Table(Default::default()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScriptedConfig {
    #[serde(default = "default_utterances")]
    pub utterances: Vec<String>,

    #[serde(default = "default_word_interval_ms")]
    pub word_interval_ms: u64,

    #[serde(default = "default_utterances_per_session")]
    pub utterances_per_session: usize,
}

impl Default for ScriptedConfig {
    fn default() -> Self {
        Self {
            utterances: default_utterances(),
            word_interval_ms: default_word_interval_ms(),
            utterances_per_session: default_utterances_per_session(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_engine() -> String {
    "scripted".to_string()
}

pub fn default_utterances() -> Vec<String> {
    [
        "hello world",
        "this is a demo of speech recognition",
        "the words arrive as they are transcribed",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_word_interval_ms() -> u64 {
    200
}

pub fn default_utterances_per_session() -> usize {
    3
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;
    let mut result = input.to_string();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        let val = std::env::var(var_name)
            .map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
        result = result.replace(&cap[0], &val);
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            engine = %config.recognizer.engine,
            "config loaded"
        );
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}
