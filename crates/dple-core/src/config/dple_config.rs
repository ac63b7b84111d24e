//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BudgetConfig, FeatureConfig, SiteConfig};
use crate::errors::ConfigError;

/// Name of the project config file looked up in the config root.
pub const CONFIG_FILE_NAME: &str = "dple.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`DPLE_*`)
/// 2. Project config (`dple.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DpleConfig {
    pub features: FeatureConfig,
    pub budget: BudgetConfig,
    pub site: SiteConfig,
}

impl DpleConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: DpleConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &DpleConfig) -> Result<(), ConfigError> {
        if config.budget.max_result_count == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "budget.max_result_count".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.budget.dlp_max_result_count == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "budget.dlp_max_result_count".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        config.features.effective_order()?;
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut DpleConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: DpleConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut DpleConfig, other: &DpleConfig) {
        // Features
        if other.features.order.is_some() {
            base.features.order = other.features.order.clone();
        }
        if !other.features.disabled.is_empty() {
            base.features.disabled = other.features.disabled.clone();
        }

        // Budget
        if other.budget.max_cost.is_some() {
            base.budget.max_cost = other.budget.max_cost;
        }
        if other.budget.max_result_count.is_some() {
            base.budget.max_result_count = other.budget.max_result_count;
        }
        for (key, cost) in &other.budget.cond_costs {
            base.budget.cond_costs.insert(key.clone(), *cost);
        }
        for (key, cost) in &other.budget.order_costs {
            base.budget.order_costs.insert(key.clone(), *cost);
        }
        if other.budget.dlp_max_categories.is_some() {
            base.budget.dlp_max_categories = other.budget.dlp_max_categories;
        }
        if other.budget.dlp_allow_unlimited_categories.is_some() {
            base.budget.dlp_allow_unlimited_categories =
                other.budget.dlp_allow_unlimited_categories;
        }
        if other.budget.dlp_max_result_count.is_some() {
            base.budget.dlp_max_result_count = other.budget.dlp_max_result_count;
        }
        if other.budget.dlp_allow_unlimited_results.is_some() {
            base.budget.dlp_allow_unlimited_results = other.budget.dlp_allow_unlimited_results;
        }

        // Site
        if other.site.disable_counters.is_some() {
            base.site.disable_counters = other.site.disable_counters;
        }
        if !other.site.content_namespaces.is_empty() {
            base.site.content_namespaces = other.site.content_namespaces.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `DPLE_MAX_COST`, `DPLE_MAX_RESULT_COUNT`, `DPLE_DISABLE_COUNTERS`.
    fn apply_env_overrides(config: &mut DpleConfig) {
        if let Ok(val) = std::env::var("DPLE_MAX_COST") {
            if let Ok(v) = val.parse::<u32>() {
                config.budget.max_cost = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DPLE_MAX_RESULT_COUNT") {
            if let Ok(v) = val.parse::<u32>() {
                config.budget.max_result_count = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DPLE_DISABLE_COUNTERS") {
            if let Ok(v) = val.parse::<bool>() {
                config.site.disable_counters = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
