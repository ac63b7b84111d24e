//! Two-phase feature registry.
//!
//! During construction features are appended to a [`FeatureSetBuilder`],
//! one per variant, in configuration order. Finalizing yields a read-only
//! [`FeatureSet`] that every feature can consult while mutating the query.

use rustc_hash::FxHashMap;

use dple_core::types::FeatureKind;

use crate::converters::ResultShape;
use crate::feature::{DpleFeature, Feature};
use crate::features::LinkedEntityFeature;

/// Append-only registry used while features are constructed.
#[derive(Debug, Default)]
pub struct FeatureSetBuilder {
    features: Vec<Feature>,
}

impl FeatureSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: FeatureKind) -> bool {
        self.features.iter().any(|f| f.kind() == kind)
    }

    /// Features registered so far.
    pub fn get(&self, kind: FeatureKind) -> Option<&Feature> {
        self.features.iter().find(|f| f.kind() == kind)
    }

    /// Append a feature. A second feature of an already registered kind
    /// is ignored and returned.
    pub fn register(&mut self, feature: Feature) -> Option<Feature> {
        if self.contains(feature.kind()) {
            return Some(feature);
        }
        self.features.push(feature);
        None
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn finalize(self) -> FeatureSet {
        let index = self
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.kind(), i))
            .collect();

        let mut converters = FxHashMap::default();
        for feature in &self.features {
            for shape in feature.result_converters() {
                converters.entry(*shape).or_insert(feature.kind());
            }
        }

        FeatureSet {
            features: self.features,
            index,
            converters,
        }
    }
}

/// The finalized, read-only feature collection of one request.
#[derive(Debug)]
pub struct FeatureSet {
    features: Vec<Feature>,
    index: FxHashMap<FeatureKind, usize>,
    converters: FxHashMap<ResultShape, FeatureKind>,
}

impl FeatureSet {
    pub fn get(&self, kind: FeatureKind) -> Option<&Feature> {
        self.index.get(&kind).map(|&i| &self.features[i])
    }

    pub fn contains(&self, kind: FeatureKind) -> bool {
        self.index.contains_key(&kind)
    }

    /// Features in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.features.iter().map(DpleFeature::kind)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn linked(&self, kind: FeatureKind) -> Option<&LinkedEntityFeature> {
        self.get(kind).and_then(Feature::as_linked)
    }

    /// Number of included entities of a linked-entity feature; 0 when the
    /// feature is absent.
    pub fn linked_count(&self, kind: FeatureKind) -> usize {
        self.linked(kind).map_or(0, LinkedEntityFeature::linked_count)
    }

    pub fn total_cost(&self) -> u32 {
        self.features
            .iter()
            .map(DpleFeature::cost)
            .fold(0, u32::saturating_add)
    }

    /// The feature that owns a result shape.
    pub fn converter_owner(&self, shape: ResultShape) -> Option<&Feature> {
        self.converters.get(&shape).and_then(|kind| self.get(*kind))
    }

    pub fn converter_shapes(&self) -> impl Iterator<Item = ResultShape> + '_ {
        self.converters.keys().copied()
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{linked, CountFeature, ResultsFeature};
    use crate::test_support::Fixture;
    use dple_core::params::ParameterSet;

    /// A second feature of the same kind is handed back unregistered.
    #[test]
    fn test_register_once_per_kind() {
        let mut builder = FeatureSetBuilder::new();
        assert!(builder.register(Feature::Results(ResultsFeature::new())).is_none());
        let rejected = builder.register(Feature::Results(ResultsFeature::new()));
        assert_eq!(rejected.map(|f| f.kind()), Some(FeatureKind::Results));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_finalized_lookups() {
        let fixture = Fixture::new();
        let settings = fixture.settings();
        let params = ParameterSet::new().with("category", vec!["A", "B"]).with("count", 5_i64);
        let ctx = fixture.context(&params, &settings);

        let mut builder = FeatureSetBuilder::new();
        builder.register(Feature::Count(CountFeature::new(&ctx)));
        builder.register(Feature::Linked(LinkedEntityFeature::new(&linked::CATEGORY, &ctx)));
        builder.register(Feature::Results(ResultsFeature::new()));
        assert!(builder.contains(FeatureKind::Category));
        let features = builder.finalize();

        let kinds: Vec<_> = features.kinds().collect();
        assert_eq!(kinds, vec![FeatureKind::Count, FeatureKind::Category, FeatureKind::Results]);
        assert_eq!(features.linked_count(FeatureKind::Category), 2);
        assert_eq!(features.linked_count(FeatureKind::Contains), 0);
        assert_eq!(features.total_cost(), 2);
        assert_eq!(features.converter_shapes().count(), 4);
        assert_eq!(
            features.converter_owner(ResultShape::Arrays).map(|f| f.kind()),
            Some(FeatureKind::Results)
        );
        assert!(features.linked(FeatureKind::Count).is_none());
    }

    /// Very large configured unit costs saturate instead of wrapping.
    #[test]
    fn test_total_cost_saturates() {
        use dple_core::config::{DpleConfig, Settings};

        let mut config = DpleConfig::default();
        config.budget.cond_costs.insert("category".to_string(), u32::MAX / 2);
        config.budget.cond_costs.insert("uses".to_string(), u32::MAX / 2);
        let settings = Settings::from_config(&config).unwrap();
        let fixture = Fixture::new();
        let params = ParameterSet::new()
            .with("category", vec!["A", "B"])
            .with("uses", "Box");
        let ctx = fixture.context(&params, &settings);

        let mut builder = FeatureSetBuilder::new();
        builder.register(Feature::Linked(LinkedEntityFeature::new(&linked::CATEGORY, &ctx)));
        builder.register(Feature::Linked(LinkedEntityFeature::new(&linked::USES, &ctx)));
        let features = builder.finalize();

        assert_eq!(features.total_cost(), u32::MAX);
    }
}
