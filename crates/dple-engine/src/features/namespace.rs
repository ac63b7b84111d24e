//! Namespace restriction.

use dple_core::errors::{EngineError, ParamError};
use dple_core::params::{parse_namespace, ParamValue};
use dple_core::query::{ColumnRef, DpleQuery, Predicate, SqlValue};
use dple_core::traits::NamespaceTable;
use dple_core::types::FeatureKind;

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// Restricts `page_namespace` to, or away from, the given namespaces.
#[derive(Debug)]
pub struct NamespaceFeature {
    namespaces: Vec<i32>,
    not_namespaces: Vec<i32>,
}

impl NamespaceFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Result<Self, ParamError> {
        let table = ctx.host.namespaces;
        Ok(Self {
            namespaces: parse_all(ctx.params.get("namespace"), table)?,
            not_namespaces: parse_all(ctx.params.get("notnamespace"), table)?,
        })
    }

    pub fn namespaces(&self) -> &[i32] {
        &self.namespaces
    }

    pub fn not_namespaces(&self) -> &[i32] {
        &self.not_namespaces
    }
}

fn parse_all(value: Option<&ParamValue>, table: &dyn NamespaceTable) -> Result<Vec<i32>, ParamError> {
    value
        .map(ParamValue::scalars)
        .unwrap_or_default()
        .iter()
        .map(|v| parse_namespace(v, table))
        .collect()
}

fn values(namespaces: &[i32]) -> Vec<SqlValue> {
    namespaces.iter().map(|ns| SqlValue::from(*ns)).collect()
}

impl DpleFeature for NamespaceFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Namespace
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        let column = || ColumnRef::new("page_namespace");
        if !self.namespaces.is_empty() {
            query.add_cond(Predicate::in_list(column(), values(&self.namespaces)));
        }
        if !self.not_namespaces.is_empty() {
            query.add_cond(Predicate::not_in_list(column(), values(&self.not_namespaces)));
        }
        Ok(())
    }
}
