use crate::chill::Algorithm;
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(
        default,
        rename = "ChillTime",
        alias = "chilltime",
        alias = "ChillHours",
        alias = "chillhours"
    )]
    pub chill_time: ChillTimeConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChillTimeConfig {
    /// simple, utah or modified (case-insensitive)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

fn default_algorithm() -> String {
    Algorithm::default().name().to_string()
}

impl Default for ChillTimeConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
        }
    }
}

impl ChillTimeConfig {
    pub fn algorithm(&self) -> Result<Algorithm> {
        self.algorithm
            .parse()
            .with_context(|| format!("Invalid [ChillTime] algorithm '{}'", self.algorithm))
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.chill_time.algorithm()?;
        Ok(())
    }
}

pub fn default_path() -> Result<PathBuf> {
    let config_dir = home::home_dir()
        .context("Could not find home directory")?
        .join(".chill-time");
    Ok(config_dir.join("config.toml"))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;
    Ok(config)
}

/// Load `~/.chill-time/config.toml`, falling back to defaults when it does not exist.
pub fn load() -> Result<Config> {
    let config_path = default_path()?;
    if !config_path.exists() {
        warn!(path = %config_path.display(), "No config file found, using defaults");
        return Ok(Config::default());
    }
    load_from_path(&config_path)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
