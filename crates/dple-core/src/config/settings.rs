//! Resolved engine settings.
//!
//! [`Settings`] is built once from a [`DpleConfig`] and is read-only
//! afterwards. It is passed by reference into every engine construction.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::feature_config::move_guard_last;
use super::{BudgetConfig, DpleConfig};
use crate::constants::USER_EXPENSIVE_KEY;
use crate::errors::ConfigError;
use crate::types::{FeatureKind, SortMethod};

static INSTALLED: OnceLock<Settings> = OnceLock::new();

/// Immutable, fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    features: Vec<FeatureKind>,
    max_cost: u32,
    max_result_count: u32,
    cond_costs: FxHashMap<String, u32>,
    order_costs: FxHashMap<String, u32>,
    counters_enabled: bool,
    content_namespaces: Vec<i32>,
}

impl Settings {
    /// Resolve every fallback chain of `config`.
    pub fn from_config(config: &DpleConfig) -> Result<Self, ConfigError> {
        DpleConfig::validate(config)?;

        let features = config.features.effective_order()?;

        let (cond_costs, order_costs) = resolve_costs(&config.budget);

        Ok(Self {
            features,
            max_cost: config.budget.effective_max_cost(),
            max_result_count: config.budget.effective_max_result_count(),
            cond_costs,
            order_costs,
            counters_enabled: config.site.counters_enabled(),
            content_namespaces: config.site.effective_content_namespaces(),
        })
    }

    /// Enabled feature variants in construction order.
    pub fn features(&self) -> &[FeatureKind] {
        &self.features
    }

    pub fn max_cost(&self) -> u32 {
        self.max_cost
    }

    pub fn max_result_count(&self) -> u32 {
        self.max_result_count
    }

    /// Join-unit cost for a condition cost key, 0 if unlisted.
    pub fn cond_cost(&self, key: &str) -> u32 {
        self.cond_costs.get(key).copied().unwrap_or(0)
    }

    /// Join-unit cost for a condition cost key, `None` if unlisted.
    pub fn cond_cost_opt(&self, key: &str) -> Option<u32> {
        self.cond_costs.get(key).copied()
    }

    /// Cost of a sort method, 0 if unlisted.
    pub fn order_cost(&self, method: &str) -> u32 {
        self.order_costs.get(method).copied().unwrap_or(0)
    }

    pub fn counters_enabled(&self) -> bool {
        self.counters_enabled
    }

    pub fn content_namespaces(&self) -> &[i32] {
        &self.content_namespaces
    }

    /// Copy with a different feature list. Intended for hosts and tests
    /// that assemble a reduced feature set programmatically. The guard is
    /// moved to the end, as in [`FeatureConfig::effective_order`].
    ///
    /// [`FeatureConfig::effective_order`]: super::FeatureConfig::effective_order
    pub fn with_features(mut self, mut features: Vec<FeatureKind>) -> Self {
        move_guard_last(&mut features);
        self.features = features;
        self
    }

    /// Copy with a different cost ceiling.
    pub fn with_max_cost(mut self, max_cost: u32) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// Copy with view counters switched on or off.
    pub fn with_counters_enabled(mut self, enabled: bool) -> Self {
        self.counters_enabled = enabled;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        let config = DpleConfig::default();
        let (cond_costs, order_costs) = resolve_costs(&config.budget);
        Self {
            features: FeatureKind::default_order().to_vec(),
            max_cost: config.budget.effective_max_cost(),
            max_result_count: config.budget.effective_max_result_count(),
            cond_costs,
            order_costs,
            counters_enabled: config.site.counters_enabled(),
            content_namespaces: config.site.effective_content_namespaces(),
        }
    }
}

/// Flatten the condition and sort method cost tables, defaults included.
fn resolve_costs(budget: &BudgetConfig) -> (FxHashMap<String, u32>, FxHashMap<String, u32>) {
    let cond_keys = FeatureKind::default_order()
        .iter()
        .map(|kind| kind.name())
        .chain(std::iter::once(USER_EXPENSIVE_KEY))
        .chain(budget.cond_costs.keys().map(String::as_str));
    let mut cond_costs = FxHashMap::default();
    for key in cond_keys {
        if let Some(cost) = budget.effective_cond_cost(key) {
            cond_costs.insert(key.to_string(), cost);
        }
    }

    let order_keys = SortMethod::ALL
        .iter()
        .map(|method| method.name())
        .chain(budget.order_costs.keys().map(String::as_str));
    let mut order_costs = FxHashMap::default();
    for key in order_keys {
        if let Some(cost) = budget.effective_order_cost(key) {
            order_costs.insert(key.to_string(), cost);
        }
    }

    (cond_costs, order_costs)
}

/// Install the process-wide settings.
///
/// First caller wins; later calls are no-ops and return the settings
/// installed first.
pub fn install(settings: Settings) -> &'static Settings {
    let installed = INSTALLED.get_or_init(|| settings);
    ::tracing::debug!(
        max_cost = installed.max_cost,
        max_result_count = installed.max_result_count,
        "engine settings installed"
    );
    installed
}
