//! User configuration for cloakline.
//!
//! Stored in `~/.cloakline/config.toml`. Passwords are never read from or
//! written to this file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default log filter when neither `RUST_LOG` nor `--verbose` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Settings read from the config file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log filter directive, e.g. `"info"` or `"cloakline=debug"`.
    pub log_level: String,

    /// Allow commands to replace an existing output file.
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            overwrite: false,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or the defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }
}

/// Get the cloakline configuration directory (`~/.cloakline`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".cloakline"))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, "warn");
        assert!(!config.overwrite);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "overwrite = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.overwrite);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"cloakline=debug\"\noverwrite = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_level, "cloakline=debug");
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "overwrite = maybe").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::TomlParseError(_))
        ));
    }
}
