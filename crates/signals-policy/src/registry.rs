//! Policy registry for selecting a signal policy by name.

use crate::{ConfluenceConfig, ConfluencePolicy, TrendConfig, TrendPolicy};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use signals_core::{
    error::PolicyError,
    traits::{PolicyConfig, SignalPolicy},
};
use std::collections::BTreeMap;

/// Information about a registered policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyInfo {
    /// Registry key
    pub name: String,
    /// Policy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry of the built-in signal policies.
pub struct PolicyRegistry {
    policies: BTreeMap<String, PolicyInfo>,
}

fn parse_config<C: PolicyConfig + DeserializeOwned>(
    config: serde_json::Value,
) -> Result<C, PolicyError> {
    let config: C =
        serde_json::from_value(config).map_err(|e| PolicyError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn default_json<C: Serialize>(config: C) -> serde_json::Value {
    serde_json::to_value(config).unwrap_or(serde_json::Value::Null)
}

impl PolicyRegistry {
    /// Name of the policy used when none is configured.
    pub const DEFAULT_POLICY: &'static str = "confluence";

    /// Create a new registry with all built-in policies.
    pub fn new() -> Self {
        let mut policies = BTreeMap::new();

        let confluence = ConfluencePolicy::default();
        policies.insert(
            "confluence".to_string(),
            PolicyInfo {
                name: confluence.name().to_string(),
                description: confluence.description().to_string(),
                default_config: default_json(ConfluenceConfig::default()),
            },
        );

        let trend = TrendPolicy::default();
        policies.insert(
            "trend".to_string(),
            PolicyInfo {
                name: trend.name().to_string(),
                description: trend.description().to_string(),
                default_config: default_json(TrendConfig::default()),
            },
        );

        Self { policies }
    }

    /// List all available policies, ordered by name.
    pub fn list(&self) -> Vec<&PolicyInfo> {
        self.policies.values().collect()
    }

    /// Get policy info by name.
    pub fn get(&self, name: &str) -> Option<&PolicyInfo> {
        self.policies.get(name)
    }

    /// Check if a policy exists.
    pub fn exists(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    /// Get all policy names.
    pub fn names(&self) -> Vec<&str> {
        self.policies.keys().map(String::as_str).collect()
    }

    /// Create a policy instance from a JSON configuration.
    ///
    /// Fields missing from `config` take their defaults.
    pub fn create(
        &self,
        name: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn SignalPolicy>, PolicyError> {
        match name {
            "confluence" => Ok(Box::new(ConfluencePolicy::new(parse_config(config)?))),
            "trend" => Ok(Box::new(TrendPolicy::new(parse_config(config)?))),
            _ => Err(PolicyError::NotFound(name.to_string())),
        }
    }

    /// Create a policy with default configuration.
    pub fn create_default(&self, name: &str) -> Result<Box<dyn SignalPolicy>, PolicyError> {
        let info = self
            .get(name)
            .ok_or_else(|| PolicyError::NotFound(name.to_string()))?;
        self.create(name, info.default_config.clone())
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
