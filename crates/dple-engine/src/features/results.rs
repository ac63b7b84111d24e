//! Result conversion.
//!
//! Each shape is computed on first request and cached for the lifetime
//! of the engine instance. `arrays` is derived from `titles`, so asking
//! for both walks the raw rows once.

use std::cell::OnceCell;

use serde_json::{Map, Value};

use dple_core::constants::{DBKEY_SEPARATOR, NS_MAIN};
use dple_core::query::Row;
use dple_core::types::{FeatureKind, Title};

use crate::converters::{
    sortkey_extra, to_object, without_suffix, CustomFields, PageRecord, ResultShape, ResultView,
};
use crate::feature::{ConvertInput, DpleFeature, Feature};
use crate::registry::FeatureSet;

#[derive(Debug, Default)]
pub struct ResultsFeature {
    pagenames: OnceCell<Vec<String>>,
    fullpagenames: OnceCell<Vec<String>>,
    titles: OnceCell<Vec<PageRecord>>,
    arrays: OnceCell<Vec<Map<String, Value>>>,
}

impl ResultsFeature {
    pub fn new() -> Self {
        Self::default()
    }

    fn pagenames(&self, input: ConvertInput<'_>) -> &[String] {
        self.pagenames.get_or_init(|| {
            input
                .result
                .rows()
                .map(display_title)
                .collect()
        })
    }

    fn fullpagenames(&self, input: ConvertInput<'_>) -> &[String] {
        self.fullpagenames.get_or_init(|| {
            input
                .result
                .rows()
                .map(|row| {
                    let ns = namespace_of(row);
                    let ns_text = input.host.namespaces.display_name(ns).unwrap_or_default();
                    format!("{}:{}", ns_text, display_title(row))
                })
                .collect()
        })
    }

    fn titles(&self, input: ConvertInput<'_>) -> &[PageRecord] {
        self.titles.get_or_init(|| {
            let features = input.features;
            let extra = features.contains(FeatureKind::Extra);
            let extrax = features.contains(FeatureKind::Extrax);
            let resolve = resolves_redirects(features);

            input
                .result
                .rows()
                .map(|row| {
                    let title = Title::from_parts(
                        input.host.namespaces,
                        namespace_of(row),
                        &row.get_text("page_title").unwrap_or_default(),
                    )
                    .with_id(row.get_i64("page_id").unwrap_or(0))
                    .with_redirect(row.get_bool("page_is_redirect"));

                    let text = title.text();
                    let mut custom = CustomFields {
                        withoutsuffix: without_suffix(&text).to_string(),
                        length: row.get_i64("page_len").unwrap_or(0),
                        ..CustomFields::default()
                    };

                    if let Some(timestamp) = row.get_text("cl_timestamp") {
                        custom.categoryadd = Some(timestamp);
                        if extra {
                            (custom.sortkey, custom.extra) = sortkey_fields(row, "sortkey");
                        }
                    }

                    if let Some(timestamp) = row.get_text("clx_timestamp") {
                        custom.categoryaddx = Some(timestamp);
                        if extrax {
                            (custom.sortkeyx, custom.extrax) = sortkey_fields(row, "sortkeyx");
                        }
                    }

                    if resolve {
                        custom.target = Some(
                            title
                                .is_redirect()
                                .then(|| input.host.redirects.redirect_target(&title))
                                .flatten()
                                .map(|target| target.properties()),
                        );
                    }

                    PageRecord { title, custom }
                })
                .collect()
        })
    }

    fn arrays(&self, input: ConvertInput<'_>) -> &[Map<String, Value>] {
        self.arrays.get_or_init(|| {
            self.titles(input)
                .iter()
                .map(|record| {
                    let mut array = to_object(&record.title.properties());
                    for (key, value) in to_object(&record.custom) {
                        array.entry(key).or_insert(value);
                    }
                    array
                })
                .collect()
        })
    }
}

fn namespace_of(row: &Row) -> i32 {
    row.get_i64("page_namespace")
        .and_then(|ns| i32::try_from(ns).ok())
        .unwrap_or(NS_MAIN)
}

fn display_title(row: &Row) -> String {
    row.get_text("page_title")
        .unwrap_or_default()
        .replace(DBKEY_SEPARATOR, " ")
}

/// The sort key column and the annotation after its first `|`.
fn sortkey_fields(row: &Row, column: &str) -> (Option<String>, Option<String>) {
    let Some(sortkey) = row.get_text(column).filter(|s| !s.is_empty()) else {
        return (None, None);
    };
    let extra = sortkey_extra(&sortkey).map(str::to_string);
    (Some(sortkey), extra)
}

fn resolves_redirects(features: &FeatureSet) -> bool {
    matches!(features.get(FeatureKind::Redirects), Some(Feature::Redirects(f)) if f.resolves())
}

impl DpleFeature for ResultsFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Results
    }

    fn result_converters(&self) -> &'static [ResultShape] {
        &ResultShape::ALL
    }

    fn convert<'s>(&'s self, shape: ResultShape, input: ConvertInput<'_>) -> Option<ResultView<'s>> {
        Some(match shape {
            ResultShape::Pagenames => ResultView::Pagenames(self.pagenames(input)),
            ResultShape::Fullpagenames => ResultView::Fullpagenames(self.fullpagenames(input)),
            ResultShape::Titles => ResultView::Titles(self.titles(input)),
            ResultShape::Arrays => ResultView::Arrays(self.arrays(input)),
        })
    }
}
