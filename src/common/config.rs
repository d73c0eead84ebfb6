//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Base URL of the live mercado API
pub const DEFAULT_BASE_URL: &str = "https://api-desafio-qa.onrender.com";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Fixture generation settings
    #[serde(default)]
    pub fixtures: FixtureConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Remote API settings
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every scenario path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum wait for a single request, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum wait for TCP + TLS connection setup, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    90
}
fn default_connect_timeout() -> u64 {
    10
}

/// Fixture generation settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureConfig {
    /// Seed for reproducible fixture values
    pub seed: Option<u64>,
}

/// Report output settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ReportConfig {
    /// Write a JSON report to this path when the suite finishes
    pub json_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(super::Error::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(super::Error::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        Ok(())
    }
}
