//! Runtime configuration for the dashboard
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock dashboard: endpoints at the site root, ten rows per page,
//! uploads resolving after 1-3 seconds with an 80% success rate.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Prefix prepended to endpoint paths (empty = same origin, site root)
    #[serde(default)]
    pub api_base: String,
    /// Rows per page in the contracts table
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub upload: UploadSimulationConfig,
    #[serde(default)]
    pub storage: StorageKeys,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            page_size: default_page_size(),
            upload: UploadSimulationConfig::default(),
            storage: StorageKeys::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range
    ///
    /// # Example
    ///
    /// ```
    /// use dashboard_core::config::DashboardConfig;
    ///
    /// let config = DashboardConfig::from_json(r#"{"page_size": 25}"#).unwrap();
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.upload.min_delay_ms, 1000);
    /// ```
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        self.upload.validate()
    }
}

/// Timing and outcome odds for the simulated upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSimulationConfig {
    /// Inclusive lower bound of the resolution delay
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Exclusive upper bound of the resolution delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_success_probability")]
    pub success_probability: f64,
}

impl Default for UploadSimulationConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            success_probability: default_success_probability(),
        }
    }
}

impl UploadSimulationConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_delay_ms >= self.max_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "upload delay range is empty: {}..{} ms",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err(ConfigError::Invalid(format!(
                "success_probability must be within [0, 1], got {}",
                self.success_probability
            )));
        }
        Ok(())
    }
}

/// Local storage keys for the persisted session token and theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    #[serde(default = "default_session_key")]
    pub session: String,
    #[serde(default = "default_theme_key")]
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            session: default_session_key(),
            theme: default_theme_key(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    3000
}

fn default_success_probability() -> f64 {
    0.8
}

fn default_session_key() -> String {
    "mock_jwt".to_string()
}

fn default_theme_key() -> String {
    "theme".to_string()
}
