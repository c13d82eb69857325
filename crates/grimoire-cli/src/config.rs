//! Session settings: an optional YAML file merged with command-line flags (flags win).

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Wizards source, relative to the config file's directory when not absolute.
    #[serde(default)]
    pub wizards: Option<PathBuf>,
    /// Spellbooks source, relative to the config file's directory when not absolute.
    #[serde(default)]
    pub spellbooks: Option<PathBuf>,
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

const ZERO_ATTEMPTS: &str = "max_login_attempts must be greater than 0";

fn default_max_login_attempts() -> u32 {
    3
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            wizards: None,
            spellbooks: None,
            max_login_attempts: default_max_login_attempts(),
            format: None,
        }
    }
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(content.as_str())?;
        if let Some(base) = path.parent() {
            config.wizards = config.wizards.map(|source| base.join(source));
            config.spellbooks = config.spellbooks.map(|source| base.join(source));
        }
        Ok(config)
    }

    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: FileConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_login_attempts == 0 {
            return Err(ConfigError::Validation(ZERO_ATTEMPTS.into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// YAML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Wizards source file
    #[arg(long)]
    pub wizards: Option<PathBuf>,
    /// Spellbooks source file
    #[arg(long)]
    pub spellbooks: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    #[arg(long)]
    pub max_login_attempts: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub wizards: PathBuf,
    pub spellbooks: PathBuf,
    pub max_login_attempts: u32,
    pub format: OutputFormat,
}

impl Settings {
    pub fn load(args: &SourceArgs) -> Result<Self, ConfigError> {
        let file = match args.config.as_deref() {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };
        Self::merge(file, args)
    }

    fn merge(file: FileConfig, args: &SourceArgs) -> Result<Self, ConfigError> {
        let wizards = args.wizards.clone().or(file.wizards).ok_or_else(|| {
            ConfigError::Validation("a wizards file is required (--wizards or config)".into())
        })?;
        let spellbooks = args.spellbooks.clone().or(file.spellbooks).ok_or_else(|| {
            ConfigError::Validation("a spellbooks file is required (--spellbooks or config)".into())
        })?;
        let max_login_attempts = args.max_login_attempts.unwrap_or(file.max_login_attempts);
        if max_login_attempts == 0 {
            return Err(ConfigError::Validation(ZERO_ATTEMPTS.into()));
        }

        Ok(Self {
            wizards,
            spellbooks,
            max_login_attempts,
            format: args.format.or(file.format).unwrap_or_default(),
        })
    }
}
