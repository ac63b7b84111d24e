//! Result size limit.

use dple_core::errors::EngineError;
use dple_core::params::numeric::int_value;
use dple_core::query::{DpleQuery, QueryOption};
use dple_core::types::FeatureKind;

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// Limits the number of rows to `count`, clamped to `1..=max_result_count`.
/// Without a `count` parameter the ceiling applies.
#[derive(Debug)]
pub struct CountFeature {
    count: u32,
}

impl CountFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        let max = ctx.settings.max_result_count();
        let count = match ctx.params.get("count") {
            None => max,
            Some(value) => {
                let requested = match value.as_scalar() {
                    Some(scalar) => int_value(scalar),
                    // A list counts as 1 when it has elements.
                    None => i64::from(!value.scalars().is_empty()),
                };
                if requested < 1 {
                    1
                } else {
                    u32::try_from(requested).map_or(max, |n| n.min(max))
                }
            }
        };
        Self { count }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl DpleFeature for CountFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Count
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        query.set_option(QueryOption::Limit(self.count));
        Ok(())
    }
}
