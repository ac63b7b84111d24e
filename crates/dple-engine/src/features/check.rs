//! The cost guard.

use std::cell::OnceCell;

use dple_core::errors::{EngineError, GuardError};
use dple_core::query::DpleQuery;
use dple_core::types::FeatureKind;

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// Refuses unconstrained or over-budget queries. Must run after every
/// other feature has modified the query.
#[derive(Debug)]
pub struct CheckFeature {
    max_cost: u32,
    total_cost: OnceCell<u32>,
}

impl CheckFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        Self {
            max_cost: ctx.settings.max_cost(),
            total_cost: OnceCell::new(),
        }
    }

    pub fn max_cost(&self) -> u32 {
        self.max_cost
    }

    /// Summed cost of all features; `None` until the guard has run.
    pub fn total_cost(&self) -> Option<u32> {
        self.total_cost.get().copied()
    }
}

impl DpleFeature for CheckFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Check
    }

    fn modify_query(&self, features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        if query.conds().is_empty() {
            tracing::warn!("refusing query without selection criteria");
            return Err(GuardError::NoSelectionCriteria.into());
        }

        let total = *self.total_cost.get_or_init(|| features.total_cost());
        if total > self.max_cost {
            tracing::warn!(total, max = self.max_cost, "refusing query over cost budget");
            return Err(GuardError::CostExceeded {
                total,
                max: self.max_cost,
            }
            .into());
        }

        tracing::debug!(total, max = self.max_cost, "query within cost budget");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use crate::features::{linked, LinkedEntityFeature};
    use crate::registry::FeatureSetBuilder;
    use crate::test_support::Fixture;
    use dple_core::params::ParameterSet;
    use dple_core::query::{ColumnRef, Predicate};

    fn guard(categories: usize, max_cost: u32, with_cond: bool) -> Result<(), EngineError> {
        let fixture = Fixture::new();
        let settings = fixture.settings().with_max_cost(max_cost);
        let names: Vec<String> = (0..categories).map(|i| format!("C{i}")).collect();
        let params = ParameterSet::new().with("category", names);
        let ctx = fixture.context(&params, &settings);

        let mut builder = FeatureSetBuilder::new();
        builder.register(Feature::Linked(LinkedEntityFeature::new(&linked::CATEGORY, &ctx)));
        builder.register(Feature::Check(CheckFeature::new(&ctx)));
        let features = builder.finalize();

        let mut query = DpleQuery::new();
        if with_cond {
            query.add_cond(Predicate::eq(ColumnRef::new("page_namespace"), 0_i64));
        }
        let check = features.get(FeatureKind::Check).expect("check registered");
        check.modify_query(&features, &mut query)
    }

    #[test]
    fn test_no_conditions() {
        let err = guard(0, 6, false).unwrap_err();
        assert_eq!(err, EngineError::Guard(GuardError::NoSelectionCriteria));
    }

    /// Exactly at the ceiling passes, one unit above fails with both values.
    #[test]
    fn test_cost_boundary() {
        assert!(guard(4, 4, true).is_ok());
        let err = guard(5, 4, true).unwrap_err();
        assert_eq!(err, EngineError::Guard(GuardError::CostExceeded { total: 5, max: 4 }));
    }

    #[test]
    fn test_total_recorded() {
        let fixture = Fixture::new();
        let settings = fixture.settings();
        let params = ParameterSet::new();
        let check = CheckFeature::new(&fixture.context(&params, &settings));
        assert_eq!(check.total_cost(), None);

        let mut query = DpleQuery::new();
        query.add_cond(Predicate::eq(ColumnRef::new("page_is_redirect"), 0_i64));
        check
            .modify_query(&FeatureSetBuilder::new().finalize(), &mut query)
            .expect("within budget");
        assert_eq!(check.total_cost(), Some(0));
        assert_eq!(check.max_cost(), 6);
    }
}
