//! Configuration management for boutique
//!
//! Handles the ~/.boutique/ directory structure and config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::router::DEFAULT_NOTIFICATION;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Document used when --document is not given
    #[serde(default = "default_document")]
    pub default_document: String,
    /// Shown after stands or variations were generated
    #[serde(default = "default_notification")]
    pub notification: String,
}

fn default_document() -> String {
    "default".to_string()
}

fn default_notification() -> String {
    DEFAULT_NOTIFICATION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_document: default_document(),
            notification: default_notification(),
        }
    }
}

/// Returns the path to the boutique home directory (~/.boutique)
pub fn boutique_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".boutique"))
}

/// Returns paths to all boutique directories
pub struct BoutiquePaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub db: PathBuf,
    pub db_file: PathBuf,
}

impl BoutiquePaths {
    pub fn new() -> Result<Self> {
        Ok(Self::at(boutique_home()?))
    }

    /// Paths under an explicit root
    pub fn at(root: PathBuf) -> Self {
        Self {
            config: root.join("config.toml"),
            db: root.join("db"),
            db_file: root.join("db/boutique.db"),
            root,
        }
    }

    /// Create all directories if they don't exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create boutique root")?;
        fs::create_dir_all(&self.db).context("Failed to create db directory")?;
        Ok(())
    }

    /// Check if boutique has been initialized
    pub fn is_initialized(&self) -> bool {
        self.config.exists() && self.db_file.exists()
    }

    /// Load configuration, defaults when config.toml is missing
    pub fn load_config(&self) -> Result<Config> {
        if !self.config.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&self.config).context("Failed to read config.toml")?;
        toml::from_str(&content).context("Failed to parse config.toml")
    }

    /// Save configuration to disk
    pub fn save_config(&self, config: &Config) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config, content).context("Failed to write config.toml")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BoutiquePaths::at(dir.path().to_path_buf());
        assert_eq!(paths.load_config().unwrap(), Config::default());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BoutiquePaths::at(dir.path().to_path_buf());
        fs::write(&paths.config, "default_document = \"landing-page\"\n").unwrap();

        let config = paths.load_config().unwrap();
        assert_eq!(config.default_document, "landing-page");
        assert_eq!(config.notification, DEFAULT_NOTIFICATION);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BoutiquePaths::at(dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();
        let config = Config {
            default_document: "site".to_string(),
            notification: "Done".to_string(),
        };
        paths.save_config(&config).unwrap();
        assert_eq!(paths.load_config().unwrap(), config);
    }
}
