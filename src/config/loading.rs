//! Configuration loading functionality.
//!
//! Finds `circadian.toml`, parses it when present, overlays the environment,
//! and validates the merged result.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
/// Returns an error if already set.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
/// Returns None if using the default directory.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Load configuration using automatic path detection.
pub fn load() -> Result<Config> {
    load_from_path(&get_config_path()?)
}

/// Load configuration from a specific path.
///
/// A missing file is not an error: the configuration then comes from the
/// environment alone. Environment variables override file values.
pub fn load_from_path(path: &PathBuf) -> Result<Config> {
    let mut config = if path.exists() {
        read_config_file(path)?
    } else {
        Config::default()
    };

    config
        .apply_env_overrides()
        .context("Invalid configuration in environment")?;

    validate_config(&config)?;
    Ok(config)
}

/// Get the configuration file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &PathBuf) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    config.source = Some(path.clone());

    Ok(config)
}
