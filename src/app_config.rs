use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory of the model artifact store
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Engine config
    #[serde(default)]
    pub engine: EngineSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Engine tuning settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineSettings {
    // @field: Max concurrent decode calls
    #[serde(default = "default_concurrent_decodes")]
    pub max_concurrent_decodes: usize,

    // @field: Timeout seconds per translate call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_concurrent_decodes: default_concurrent_decodes(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: log crate filter for this level
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_decodes() -> usize {
    // One local decoding resource; concurrent calls queue
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("penerjemah").join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.engine.max_concurrent_decodes == 0 {
            return Err(anyhow!("engine.max_concurrent_decodes must be at least 1"));
        }
        if self.engine.timeout_secs == 0 {
            return Err(anyhow!("engine.timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            models_dir: default_models_dir(),
            engine: EngineSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}
