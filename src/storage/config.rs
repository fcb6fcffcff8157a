//! Configuration handling for Liszt
//!
//! Configuration is stored in `~/.config/liszt/config.toml` (or the
//! platform equivalent). Every key is optional.
//!
//! ```toml
//! database = "/home/me/boards.db"
//! seed_defaults = true
//! default_format = "text"
//! prompt = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Could not determine a data directory; pass --db")]
    NoDataDir,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file (defaults to `<data dir>/liszt.db`)
    pub database: Option<PathBuf>,

    /// Seed a freshly created database with a starter board
    pub seed_defaults: bool,

    /// Default output format
    pub default_format: OutputFormat,

    /// Show the `(<board>)> ` prompt in the shell
    pub prompt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            seed_defaults: true,
            default_format: OutputFormat::Text,
            prompt: true,
        }
    }
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::global_config_dir() {
            Some(dir) => Self::from_path(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a file, defaulting when it does not exist
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "liszt", "liszt")
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default database location inside the platform data directory
    pub fn default_database_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("liszt.db"))
    }

    /// Database path: explicit override, then config, then default
    pub fn database_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        Self::default_database_path().ok_or_else(|| ConfigError::NoDataDir.into())
    }
}
