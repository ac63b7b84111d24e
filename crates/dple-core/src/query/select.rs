//! Tables, columns, joins and options of a select.

use smallvec::SmallVec;

use super::{ColumnRef, Predicate};
use crate::types::SortOrder;

/// A table in the FROM list, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// The name join conditions are keyed by.
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A column expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Column(ColumnRef),
    /// `REPLACE(expr, from, to)`
    Replace {
        expr: Box<Expr>,
        from: String,
        to: String,
    },
}

impl From<ColumnRef> for Expr {
    fn from(c: ColumnRef) -> Self {
        Self::Column(c)
    }
}

/// An output column, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl Column {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            expr: Expr::Column(ColumnRef::new(name)),
            alias: None,
        }
    }

    pub fn aliased(alias: impl Into<String>, expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }

    /// Key under which the value appears in result rows.
    pub fn output_name(&self) -> Option<&str> {
        match (&self.alias, &self.expr) {
            (Some(alias), _) => Some(alias),
            (None, Expr::Column(c)) => Some(&c.name),
            (None, Expr::Replace { .. }) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

impl JoinKind {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub conds: SmallVec<[Predicate; 3]>,
}

/// Join specifications keyed by table alias, in insertion order.
/// Re-adding a key replaces its spec in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinConds {
    entries: Vec<(String, JoinSpec)>,
}

impl JoinConds {
    pub fn insert(&mut self, key: impl Into<String>, spec: JoinSpec) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = spec,
            None => self.entries.push((key, spec)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&JoinSpec> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JoinSpec)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_kind(&self, kind: JoinKind) -> usize {
        self.entries.iter().filter(|(_, s)| s.kind == kind).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub expr: Expr,
    pub order: SortOrder,
}

impl OrderTerm {
    pub fn new(expr: impl Into<Expr>, order: SortOrder) -> Self {
        Self {
            expr: expr.into(),
            order,
        }
    }
}

/// One option assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    OrderBy(Vec<OrderTerm>),
    Limit(u32),
    Distinct,
}

/// Query options. Each setting is last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub order_by: Vec<OrderTerm>,
    pub limit: Option<u32>,
    pub distinct: bool,
}

impl QueryOptions {
    pub fn set(&mut self, option: QueryOption) {
        match option {
            QueryOption::OrderBy(terms) => self.order_by = terms,
            QueryOption::Limit(n) => self.limit = Some(n),
            QueryOption::Distinct => self.distinct = true,
        }
    }
}

/// Borrowed view of an accumulated query, handed to the executor.
#[derive(Debug, Clone, Copy)]
pub struct SelectRequest<'a> {
    pub tables: &'a [TableRef],
    pub columns: &'a [Column],
    pub conds: &'a [Predicate],
    pub options: &'a QueryOptions,
    pub joins: &'a JoinConds,
}
