//! Title substring matching.

use dple_core::errors::EngineError;
use dple_core::params::{parse_title_substring, ParamValue};
use dple_core::query::{ColumnRef, DpleQuery, LikePattern, Predicate};
use dple_core::types::FeatureKind;

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// Selects pages whose title contains, or does not contain, each given
/// substring. Every value adds its own condition.
#[derive(Debug)]
pub struct TitlematchFeature {
    matches: Vec<String>,
    not_matches: Vec<String>,
}

impl TitlematchFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        Self {
            matches: substrings(ctx.params.get("titlematch")),
            not_matches: substrings(ctx.params.get("nottitlematch")),
        }
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    pub fn not_matches(&self) -> &[String] {
        &self.not_matches
    }
}

fn substrings(value: Option<&ParamValue>) -> Vec<String> {
    value
        .map(ParamValue::scalars)
        .unwrap_or_default()
        .iter()
        .filter_map(|v| parse_title_substring(Some(v)))
        .collect()
}

impl DpleFeature for TitlematchFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Titlematch
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        for text in &self.matches {
            query.add_cond(Predicate::like(
                ColumnRef::new("page_title"),
                LikePattern::containing(text.as_str()),
            ));
        }
        for text in &self.not_matches {
            query.add_cond(Predicate::not_like(
                ColumnRef::new("page_title"),
                LikePattern::containing(text.as_str()),
            ));
        }
        Ok(())
    }
}
