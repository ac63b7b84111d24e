//! Sort key selection for the rich-record converter.

use dple_core::errors::EngineError;
use dple_core::query::{Column, ColumnRef, DpleQuery};
use dple_core::types::FeatureKind;

use crate::feature::DpleFeature;
use crate::registry::FeatureSet;

/// Selects the sort key prefix of the first category (`extra`) or of the
/// first contained page (`extrax`) so converters can expose it and the
/// annotation after its `|`.
#[derive(Debug)]
pub struct ExtraFeature {
    kind: FeatureKind,
}

impl ExtraFeature {
    pub fn new(kind: FeatureKind) -> Self {
        debug_assert!(matches!(kind, FeatureKind::Extra | FeatureKind::Extrax));
        Self { kind }
    }

    /// The linked-entity feature whose first join is read, and the output column.
    fn source(&self) -> (FeatureKind, &'static str, &'static str) {
        match self.kind {
            FeatureKind::Extrax => (FeatureKind::Contains, "clx1", "sortkeyx"),
            _ => (FeatureKind::Category, "cl1", "sortkey"),
        }
    }

    pub fn output_column(&self) -> &'static str {
        self.source().2
    }
}

impl DpleFeature for ExtraFeature {
    fn kind(&self) -> FeatureKind {
        self.kind
    }

    fn modify_query(&self, features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        let (linked, alias, output) = self.source();
        if features.linked_count(linked) > 0 {
            query.add_column(Column::aliased(
                output,
                ColumnRef::qualified(alias, "cl_sortkey_prefix"),
            ));
        }
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

    #[test]
    fn test_selects_prefix_only_with_category() {
        let fixture = Fixture::new();
        let settings = fixture.settings();
        let extra = ExtraFeature::new(FeatureKind::Extra);

        let mut query = DpleQuery::new();
        extra
            .modify_query(&FeatureSetBuilder::new().finalize(), &mut query)
            .expect("modify");
        assert!(query.columns().is_empty());

        let params = ParameterSet::new().with("category", "Foo");
        let mut builder = FeatureSetBuilder::new();
        builder.register(Feature::Linked(LinkedEntityFeature::new(
            &linked::CATEGORY,
            &fixture.context(&params, &settings),
        )));
        let features = builder.finalize();

        extra.modify_query(&features, &mut query).expect("modify");
        assert_eq!(query.columns().len(), 1);
        assert_eq!(query.columns()[0].output_name(), Some("sortkey"));
    }

    #[test]
    fn test_extrax_reads_contains() {
        let extra = ExtraFeature::new(FeatureKind::Extrax);
        assert_eq!(extra.kind(), FeatureKind::Extrax);
        assert_eq!(extra.output_column(), "sortkeyx");
    }
}
