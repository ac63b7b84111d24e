//! The query accumulator.

use smallvec::SmallVec;

use super::{
    Column, JoinConds, JoinKind, JoinSpec, Predicate, QueryOption, QueryOptions, ResultSet,
    SelectRequest, TableRef,
};
use crate::constants::{PAGE_COLUMNS, PAGE_TABLE};
use crate::errors::QueryError;
use crate::traits::QueryExecutor;

/// Accumulates tables, columns, conditions, options and joins, then runs
/// them exactly once.
#[derive(Debug, Default)]
pub struct DpleQuery {
    tables: Vec<TableRef>,
    columns: Vec<Column>,
    conds: Vec<Predicate>,
    options: QueryOptions,
    join_conds: JoinConds,
    result: Option<ResultSet>,
}

impl DpleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base query every page list starts from.
    pub fn for_pages() -> Self {
        let mut query = Self::new();
        query.add_table(TableRef::new(PAGE_TABLE));
        query.add_columns(PAGE_COLUMNS.iter().map(|c| Column::plain(*c)));
        query
    }

    pub fn add_table(&mut self, table: TableRef) {
        self.tables.push(table);
    }

    pub fn add_tables(&mut self, tables: impl IntoIterator<Item = TableRef>) {
        self.tables.extend(tables);
    }

    /// Adds a column. A column with the same output name replaces the earlier one.
    pub fn add_column(&mut self, column: Column) {
        let existing = column.output_name().and_then(|name| {
            self.columns
                .iter()
                .position(|c| c.output_name() == Some(name))
        });
        match existing {
            Some(pos) => self.columns[pos] = column,
            None => self.columns.push(column),
        }
    }

    pub fn add_columns(&mut self, columns: impl IntoIterator<Item = Column>) {
        for column in columns {
            self.add_column(column);
        }
    }

    pub fn add_cond(&mut self, cond: Predicate) {
        self.conds.push(cond);
    }

    pub fn add_conds(&mut self, conds: impl IntoIterator<Item = Predicate>) {
        self.conds.extend(conds);
    }

    pub fn set_option(&mut self, option: QueryOption) {
        self.options.set(option);
    }

    pub fn add_join_cond(
        &mut self,
        table: impl Into<String>,
        kind: JoinKind,
        conds: impl IntoIterator<Item = Predicate>,
    ) {
        self.join_conds.insert(
            table,
            JoinSpec {
                kind,
                conds: conds.into_iter().collect::<SmallVec<_>>(),
            },
        );
    }

    pub fn tables(&self) -> &[TableRef] {
        &self.tables
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn conds(&self) -> &[Predicate] {
        &self.conds
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn join_conds(&self) -> &JoinConds {
        &self.join_conds
    }

    pub fn result(&self) -> Option<&ResultSet> {
        self.result.as_ref()
    }

    pub fn is_executed(&self) -> bool {
        self.result.is_some()
    }

    /// Number of result rows; 0 before execution.
    pub fn count(&self) -> usize {
        self.result.as_ref().map_or(0, ResultSet::len)
    }

    pub fn request(&self) -> SelectRequest<'_> {
        SelectRequest {
            tables: &self.tables,
            columns: &self.columns,
            conds: &self.conds,
            options: &self.options,
            joins: &self.join_conds,
        }
    }

    /// Runs the query. A second call fails without touching the executor.
    pub fn execute(&mut self, executor: &dyn QueryExecutor) -> Result<&ResultSet, QueryError> {
        if self.result.is_some() {
            return Err(QueryError::AlreadyExecuted);
        }
        let result = executor.select(&self.request())?;
        ::tracing::debug!(rows = result.len(), "query executed");
        Ok(self.result.insert(result))
    }
}
