//! Materialized query results.

use std::cell::Cell;

use rustc_hash::FxHashMap;

use super::SqlValue;

/// One result row, keyed by output column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: FxHashMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.get(column)
    }

    /// Present and not NULL.
    pub fn is_set(&self, column: &str) -> bool {
        self.get(column).is_some_and(|v| !v.is_null())
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(SqlValue::as_i64)
    }

    pub fn get_text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(SqlValue::to_text)
    }

    pub fn get_bool(&self, column: &str) -> bool {
        self.get(column).is_some_and(SqlValue::as_bool)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, SqlValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Rows produced by one execution. Immutable; replayable.
///
/// Every call to [`ResultSet::rows`] counts as one scan, so tests can
/// observe how often converters walk the raw result.
#[derive(Debug, Default)]
pub struct ResultSet {
    rows: Vec<Row>,
    scans: Cell<usize>,
}

impl ResultSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            scans: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> std::slice::Iter<'_, Row> {
        self.scans.set(self.scans.get() + 1);
        self.rows.iter()
    }

    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }
}

impl From<Vec<Row>> for ResultSet {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}
