//! Persistent connection settings

use super::{ConfigPaths, DEFAULT_REALM};
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};

/// Connection settings stored in `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tenant URL, e.g. `https://tenant.example.com/am`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_url: Option<String>,

    /// Realm to operate on
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Administrator username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub insecure: bool,
}

fn default_realm() -> String {
    DEFAULT_REALM.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant_url: None,
            realm: default_realm(),
            username: None,
            timeout_secs: default_timeout_secs(),
            insecure: false,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist
    pub fn load(paths: &ConfigPaths) -> CliResult<Self> {
        if !paths.config_file.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&paths.config_file)?;
        serde_json::from_str(&content).map_err(|e| {
            CliError::Config(format!(
                "failed to parse {}: {e}",
                paths.config_file.display()
            ))
        })
    }

    /// Write the config file
    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.config_file, content)?;
        Ok(())
    }

    /// Set a value by key name
    pub fn set(&mut self, key: &str, value: &str) -> CliResult<()> {
        match key {
            "tenant_url" | "tenant" => self.tenant_url = Some(value.trim_end_matches('/').to_string()),
            "realm" => self.realm = value.to_string(),
            "username" => self.username = Some(value.to_string()),
            "timeout_secs" | "timeout" => {
                self.timeout_secs = value.parse().map_err(|_| {
                    CliError::Validation(format!("timeout must be a number of seconds: {value}"))
                })?;
            }
            "insecure" => {
                self.insecure = value.parse().map_err(|_| {
                    CliError::Validation(format!("insecure must be true or false: {value}"))
                })?;
            }
            other => {
                return Err(CliError::Validation(format!(
                    "unknown configuration key '{other}' (expected tenant_url, realm, username, timeout_secs, insecure)"
                )))
            }
        }
        Ok(())
    }
}
