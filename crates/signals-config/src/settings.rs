//! Configuration structures.

use serde::{Deserialize, Serialize};
use signals_core::error::{PolicyError, SignalError};
use signals_core::traits::PolicyConfig;
use signals_indicators::IndicatorConfig;
use signals_policy::{ConfluenceConfig, TrendConfig};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub policy: PolicySettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub journal: JournalSettings,
}

impl AppConfig {
    /// Check every section for values the pipeline would reject.
    pub fn validate(&self) -> Result<(), SignalError> {
        self.indicators.validate()?;
        self.policy.confluence.validate()?;
        self.policy.trend.validate()?;
        self.policy.selected_config()?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SignalError> {
        toml::to_string_pretty(self).map_err(|e| SignalError::Serialization(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signals".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Also write logs to this file
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Policy selection plus per-policy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Registry name of the active policy
    pub name: String,
    pub confluence: ConfluenceConfig,
    pub trend: TrendConfig,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            name: "confluence".to_string(),
            confluence: ConfluenceConfig::default(),
            trend: TrendConfig::default(),
        }
    }
}

impl PolicySettings {
    /// Parameters of the policy called `name`, as JSON for the registry.
    pub fn config_for(&self, name: &str) -> Result<serde_json::Value, PolicyError> {
        let value = match name {
            "confluence" => serde_json::to_value(&self.confluence),
            "trend" => serde_json::to_value(&self.trend),
            _ => return Err(PolicyError::NotFound(name.to_string())),
        };
        value.map_err(|e| PolicyError::InvalidConfig(e.to_string()))
    }

    /// Parameters of the active policy.
    pub fn selected_config(&self) -> Result<serde_json::Value, PolicyError> {
        self.config_for(&self.name)
    }
}

/// Price data location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV file, or directory of `<SYMBOL>.csv` files
    pub path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: "data".to_string(),
        }
    }
}

/// Signal journal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    pub enabled: bool,
    pub path: String,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "journal/signals.csv".to_string(),
        }
    }
}
