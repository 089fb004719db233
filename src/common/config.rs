//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};
use crate::testing::DisasterType;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Scenario tuning
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

/// Where the API lives and how long to wait for it
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL; every path is joined under `<base_url>/api/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.crisismap.org".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Knobs for the fixed scenario sequence
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    /// Types queried one by one in the filtered-list step
    #[serde(default = "default_filter_types")]
    pub filter_types: Vec<DisasterType>,

    /// `source` value that marks a record as coming from the external feed
    #[serde(default = "default_sync_source")]
    pub sync_source: String,

    /// Field whose presence in the maps config is reported (advisory only)
    #[serde(default = "default_maps_key_field")]
    pub maps_key_field: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            filter_types: default_filter_types(),
            sync_source: default_sync_source(),
            maps_key_field: default_maps_key_field(),
        }
    }
}

fn default_filter_types() -> Vec<DisasterType> {
    vec![
        DisasterType::Earthquake,
        DisasterType::Wildfire,
        DisasterType::Flood,
    ]
}

fn default_sync_source() -> String {
    "USGS".to_string()
}

fn default_maps_key_field() -> String {
    "apiKey".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// used if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Parse a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        Self::parse(&content)
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be greater than zero".to_string()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        self.check()?;
        Ok(self)
    }
}
