//! Result ordering.
//!
//! The requested sort method is kept verbatim at construction and only
//! resolved when the query is built: whether `categoryadd` and its
//! relatives are usable depends on the category and contains features,
//! which may be registered after this one.

use std::cell::OnceCell;

use rustc_hash::FxHashMap;

use dple_core::errors::EngineError;
use dple_core::params::parse_order;
use dple_core::query::{ColumnRef, DpleQuery, Expr, OrderTerm, QueryOption};
use dple_core::types::{FeatureKind, SortMethod, SortOrder};

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

#[derive(Debug)]
pub struct OrderFeature {
    order: SortOrder,
    requested: Option<String>,
    counters_enabled: bool,
    costs: FxHashMap<String, u32>,
    resolved: OnceCell<SortMethod>,
}

impl OrderFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        let requested = ctx
            .params
            .get_scalar("ordermethod")
            .map(|v| v.as_text().into_owned());

        let costs = SortMethod::ALL
            .iter()
            .map(|m| m.name())
            .chain(requested.as_deref())
            .map(|name| (name.to_string(), ctx.settings.order_cost(name)))
            .collect();

        Self {
            order: parse_order(ctx.params.get("order")),
            requested,
            counters_enabled: ctx.settings.counters_enabled(),
            costs,
            resolved: OnceCell::new(),
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// The `ordermethod` parameter as given.
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// The effective sort method, once the query has been built.
    pub fn method(&self) -> Option<SortMethod> {
        self.resolved.get().copied()
    }

    /// Map the requested method to one the active features support.
    pub fn resolve(&self, features: &FeatureSet) -> SortMethod {
        resolve_method(self.requested.as_deref(), features, self.counters_enabled)
    }

    fn order_terms(&self, method: SortMethod) -> Vec<OrderTerm> {
        let order = self.order;
        let term = |expr: Expr| OrderTerm::new(expr, order);
        let col = |name: &str| Expr::Column(ColumnRef::new(name));
        let qualified = |table: &str, name: &str| Expr::Column(ColumnRef::qualified(table, name));

        match method {
            SortMethod::Created => vec![term(col("page_id"))],
            SortMethod::LastEdit => vec![term(col("page_touched"))],
            SortMethod::Length => vec![term(col("page_len"))],
            SortMethod::Popularity => vec![term(col("page_counter"))],
            SortMethod::Title => vec![term(Expr::Replace {
                expr: Box::new(col("page_title")),
                from: "_".to_string(),
                to: " ".to_string(),
            })],
            SortMethod::CategoryAdd => vec![term(qualified("cl1", "cl_timestamp"))],
            SortMethod::CategoryAddX => vec![term(qualified("clx1", "cl_timestamp"))],
            SortMethod::CategorySortkey => vec![
                term(qualified("cl1", "cl_type")),
                term(qualified("cl1", "cl_sortkey")),
            ],
            SortMethod::CategorySortkeyX => vec![
                term(qualified("clx1", "cl_type")),
                term(qualified("clx1", "cl_sortkey")),
            ],
        }
    }
}

/// Resolve a requested sort method against the registered features.
///
/// Methods that need an active category (or contains) filter fall back
/// to [`SortMethod::FALLBACK`]. `popularity` without view counters, unknown
/// names and an absent request are treated as `categoryadd`.
pub fn resolve_method(requested: Option<&str>, features: &FeatureSet, counters_enabled: bool) -> SortMethod {
    let has_categories = features.linked_count(FeatureKind::Category) > 0;
    let has_contains = features.linked_count(FeatureKind::Contains) > 0;
    let when = |active: bool, method: SortMethod| if active { method } else { SortMethod::FALLBACK };

    match requested.and_then(SortMethod::from_name) {
        Some(
            method @ (SortMethod::Created | SortMethod::LastEdit | SortMethod::Length | SortMethod::Title),
        ) => method,
        Some(SortMethod::CategoryAddX) => when(has_contains, SortMethod::CategoryAddX),
        Some(SortMethod::CategorySortkey) => when(has_categories, SortMethod::CategorySortkey),
        Some(SortMethod::CategorySortkeyX) => when(has_contains, SortMethod::CategorySortkeyX),
        Some(SortMethod::Popularity) if counters_enabled => SortMethod::Popularity,
        Some(SortMethod::CategoryAdd | SortMethod::Popularity) | None => {
            when(has_categories, SortMethod::CategoryAdd)
        }
    }
}

impl DpleFeature for OrderFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Order
    }

    /// Cost of the effective method once resolved, of the requested one before.
    fn cost(&self) -> u32 {
        let name = match self.method() {
            Some(method) => method.name(),
            None => match self.requested.as_deref() {
                Some(name) => name,
                None => return 0,
            },
        };
        self.costs.get(name).copied().unwrap_or(0)
    }

    fn modify_query(&self, features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        let method = *self.resolved.get_or_init(|| self.resolve(features));
        if self.requested.as_deref() != Some(method.name()) {
            tracing::debug!(
                requested = ?self.requested,
                resolved = %method,
                "sort method resolved"
            );
        }
        query.set_option(QueryOption::OrderBy(self.order_terms(method)));
        Ok(())
    }
}
