//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::generator::GeneratorConfig;
use crate::model::CorpusLimits;
use crate::model::corpus::{
    MAX_COMMON_PHRASES, MAX_PHRASE_WORDS, MAX_STORED_MESSAGES, MIN_PHRASE_WORDS,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    #[serde(default = "default_max_common_phrases")]
    pub max_common_phrases: usize,

    #[serde(default = "default_min_phrase_words")]
    pub min_phrase_words: usize,

    #[serde(default = "default_max_phrase_words")]
    pub max_phrase_words: usize,
}

fn default_data_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("mimic").join("model.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./mimic_data.json".to_string())
}

fn default_max_messages() -> usize {
    MAX_STORED_MESSAGES
}

fn default_max_common_phrases() -> usize {
    MAX_COMMON_PHRASES
}

fn default_min_phrase_words() -> usize {
    MIN_PHRASE_WORDS
}

fn default_max_phrase_words() -> usize {
    MAX_PHRASE_WORDS
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            max_messages: default_max_messages(),
            max_common_phrases: default_max_common_phrases(),
            min_phrase_words: default_min_phrase_words(),
            max_phrase_words: default_max_phrase_words(),
        }
    }
}

impl ModelConfig {
    pub fn limits(&self) -> CorpusLimits {
        CorpusLimits {
            max_messages: self.max_messages,
            max_common_phrases: self.max_common_phrases,
            min_phrase_words: self.min_phrase_words,
            max_phrase_words: self.max_phrase_words,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("mimic").join("config.toml")),
            Some(PathBuf::from("/etc/mimic/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check values that would otherwise panic or silently misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generator;
        for (name, p) in [
            ("generator.phrase_chance", g.phrase_chance),
            ("generator.chain_chance", g.chain_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be between 0 and 1, got {}",
                    name, p
                )));
            }
        }

        if g.min_walk_steps > g.max_walk_steps {
            return Err(ConfigError::Invalid(format!(
                "generator.min_walk_steps ({}) exceeds max_walk_steps ({})",
                g.min_walk_steps, g.max_walk_steps
            )));
        }

        let m = &self.model;
        if m.max_messages == 0 || m.max_common_phrases == 0 {
            return Err(ConfigError::Invalid(
                "model capacities must be greater than zero".to_string(),
            ));
        }
        if m.min_phrase_words > m.max_phrase_words {
            return Err(ConfigError::Invalid(format!(
                "model.min_phrase_words ({}) exceeds max_phrase_words ({})",
                m.min_phrase_words, m.max_phrase_words
            )));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_file) = std::env::var("MIMIC_DATA_FILE") {
            self.model.data_file = data_file;
        }

        if let Ok(level) = std::env::var("MIMIC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MIMIC_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Mimic Configuration
#
# Environment variables override these settings:
# - MIMIC_DATA_FILE
# - MIMIC_LOG_LEVEL
# - MIMIC_LOG_FORMAT

[model]
# JSON file holding the learned corpus
# (default: <local data dir>/mimic/model.json)
# data_file = "/path/to/model.json"

# Raw messages kept (oldest dropped first)
max_messages = 1000

# Common phrases kept (oldest dropped first)
max_common_phrases = 100

# Messages with this many words (inclusive) become common phrases
min_phrase_words = 3
max_phrase_words = 10

[generator]
# Messages needed before anything but the placeholder is generated
min_messages = 5

# Chance of replying with a stored common phrase
phrase_chance = 0.5

# Chance of building a new sentence from word pairs
chain_chance = 0.7

# Random walk length range (inclusive)
min_walk_steps = 3
max_walk_steps = 15

# Generated sentences must be longer than this many characters
min_response_length = 10

# Reply used while still learning
placeholder = "I'm still learning... give me some time!"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/mimic/mimic.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.model.data_file, ModelConfig::default().data_file);
        assert!(!config.model.data_file.starts_with('~'));
        assert_eq!(config.model.max_messages, 1000);
        assert_eq!(config.model.max_common_phrases, 100);
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.model.limits(), CorpusLimits::default());
        assert_eq!(config.generator.phrase_chance, 0.5);
        assert_eq!(config.generator.chain_chance, 0.7);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_section() {
        let config = Config::parse(
            r#"
[generator]
chain_chance = 0.9

[model]
data_file = "/tmp/speaker.json"
"#,
        )
        .unwrap();

        assert_eq!(config.generator.chain_chance, 0.9);
        assert_eq!(config.generator.phrase_chance, 0.5);
        assert_eq!(config.model.data_file, "/tmp/speaker.json");
        assert_eq!(config.model.max_messages, 1000);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let err = Config::parse("[generator]\nphrase_chance = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("generator.phrase_chance"));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err =
            Config::parse("[generator]\nmin_walk_steps = 9\nmax_walk_steps = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            Config::parse("[model]\nmin_phrase_words = 8\nmax_phrase_words = 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::parse("[model]\nmax_messages = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::parse("[generator\nphrase_chance = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
    }
}
