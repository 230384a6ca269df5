//! Platform-specific configuration paths

use crate::error::{CliError, CliResult};
use std::path::PathBuf;

/// Configuration paths for the idcloud CLI
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Base configuration directory
    pub config_dir: PathBuf,
    /// Path to config.json
    pub config_file: PathBuf,
}

impl ConfigPaths {
    /// Get configuration paths for the current platform
    ///
    /// Paths:
    /// - Linux: ~/.config/idcloud/
    /// - macOS: ~/Library/Application Support/idcloud/
    /// - Windows: %APPDATA%\idcloud\
    pub fn new() -> CliResult<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self::in_dir(config_dir))
    }

    /// Paths rooted at an explicit directory
    pub fn in_dir(config_dir: PathBuf) -> Self {
        Self {
            config_file: config_dir.join("config.json"),
            config_dir,
        }
    }

    /// Get the configuration directory, respecting IDCLOUD_CONFIG_DIR env var
    fn get_config_dir() -> CliResult<PathBuf> {
        if let Ok(dir) = std::env::var("IDCLOUD_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let base_dir = dirs::config_dir().ok_or_else(|| {
            CliError::Config("Could not determine configuration directory".to_string())
        })?;

        Ok(base_dir.join("idcloud"))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_dir_exists(&self) -> CliResult<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }
}
