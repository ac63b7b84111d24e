//! Cost budget and result ceiling configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_JOIN_COST, DEFAULT_MAX_COST, DEFAULT_MAX_RESULT_COUNT, DEFAULT_USER_EXPENSIVE_COST,
    UNLIMITED_MAX_COST, UNLIMITED_MAX_RESULT_COUNT, USER_EXPENSIVE_KEY,
};
use crate::types::FeatureKind;

/// Configuration for the cost guard and the count ceiling.
///
/// Each ceiling resolves through a fallback chain: the engine's own
/// setting, then the legacy DynamicPageList settings, then a compiled
/// default. "Unlimited" is modelled by an unrealistically large number.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BudgetConfig {
    /// Maximum summed feature cost. Default: see `effective_max_cost`.
    pub max_cost: Option<u32>,
    /// Maximum number of result rows. Default: see `effective_max_result_count`.
    pub max_result_count: Option<u32>,
    /// Per-variant join-unit cost overrides, keyed by variant name.
    #[serde(default)]
    pub cond_costs: HashMap<String, u32>,
    /// Per-sort-method cost overrides, keyed by sort method name.
    #[serde(default)]
    pub order_costs: HashMap<String, u32>,
    /// Legacy: maximum number of categories.
    pub dlp_max_categories: Option<u32>,
    /// Legacy: allow an unlimited number of categories.
    pub dlp_allow_unlimited_categories: Option<bool>,
    /// Legacy: maximum number of results.
    pub dlp_max_result_count: Option<u32>,
    /// Legacy: allow an unlimited number of results.
    pub dlp_allow_unlimited_results: Option<bool>,
}

impl BudgetConfig {
    /// Returns the effective cost ceiling.
    pub fn effective_max_cost(&self) -> u32 {
        if let Some(max) = self.max_cost {
            return max;
        }
        if self.dlp_allow_unlimited_categories.unwrap_or(false) {
            return UNLIMITED_MAX_COST;
        }
        self.dlp_max_categories.unwrap_or(DEFAULT_MAX_COST)
    }

    /// Returns the effective result row ceiling.
    pub fn effective_max_result_count(&self) -> u32 {
        if let Some(max) = self.max_result_count {
            return max;
        }
        if self.dlp_allow_unlimited_results.unwrap_or(false) {
            return UNLIMITED_MAX_RESULT_COUNT;
        }
        self.dlp_max_result_count.unwrap_or(DEFAULT_MAX_RESULT_COUNT)
    }

    /// Join-unit cost for a condition cost key, `None` if unlisted.
    pub fn effective_cond_cost(&self, key: &str) -> Option<u32> {
        self.cond_costs
            .get(key)
            .copied()
            .or_else(|| default_cond_cost(key))
    }

    /// Cost of a sort method, `None` if unlisted.
    pub fn effective_order_cost(&self, method: &str) -> Option<u32> {
        self.order_costs
            .get(method)
            .copied()
            .or_else(|| default_order_cost(method))
    }
}

/// Compiled default condition costs.
pub fn default_cond_cost(key: &str) -> Option<u32> {
    if key == USER_EXPENSIVE_KEY {
        return Some(DEFAULT_USER_EXPENSIVE_COST);
    }
    match FeatureKind::from_name(key)? {
        FeatureKind::Category
        | FeatureKind::Contains
        | FeatureKind::Linksto
        | FeatureKind::Linksfrom
        | FeatureKind::Uses
        | FeatureKind::Usedby
        | FeatureKind::Imageused
        | FeatureKind::Redirectsto
        | FeatureKind::User => Some(DEFAULT_JOIN_COST),
        _ => None,
    }
}

/// Compiled default sort method costs. Sorting on an unindexed expression
/// costs one unit.
pub fn default_order_cost(method: &str) -> Option<u32> {
    match method {
        "lastedit" | "title" | "popularity" => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_cost_fallback_chain() {
        let mut budget = BudgetConfig::default();
        assert_eq!(budget.effective_max_cost(), 6);

        budget.dlp_max_categories = Some(4);
        assert_eq!(budget.effective_max_cost(), 4);

        budget.dlp_allow_unlimited_categories = Some(true);
        assert_eq!(budget.effective_max_cost(), 1000);

        budget.max_cost = Some(9);
        assert_eq!(budget.effective_max_cost(), 9);
    }

    #[test]
    fn test_max_result_count_fallback_chain() {
        let mut budget = BudgetConfig::default();
        assert_eq!(budget.effective_max_result_count(), 200);

        budget.dlp_max_result_count = Some(50);
        assert_eq!(budget.effective_max_result_count(), 50);

        budget.dlp_allow_unlimited_results = Some(true);
        assert_eq!(budget.effective_max_result_count(), 100_000);

        budget.max_result_count = Some(10);
        assert_eq!(budget.effective_max_result_count(), 10);
    }

    #[test]
    fn test_cond_cost_override_and_defaults() {
        let mut budget = BudgetConfig::default();
        assert_eq!(budget.effective_cond_cost("category"), Some(1));
        assert_eq!(budget.effective_cond_cost("user_expensive"), Some(10));
        assert_eq!(budget.effective_cond_cost("order"), None);

        budget.cond_costs.insert("category".to_string(), 3);
        assert_eq!(budget.effective_cond_cost("category"), Some(3));
    }

    #[test]
    fn test_order_cost_defaults() {
        let budget = BudgetConfig::default();
        assert_eq!(budget.effective_order_cost("title"), Some(1));
        assert_eq!(budget.effective_order_cost("created"), None);
    }
}
