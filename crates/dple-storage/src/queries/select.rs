//! Rendering and running structured selects.
//!
//! Identifiers come from feature definitions and are checked, never
//! quoted; every literal value is bound as a parameter. Wildcard
//! containment renders as `GLOB`, so matching is case-sensitive.

use dple_core::errors::StorageError;
use dple_core::query::{
    ColumnRef, Expr, LikePattern, LikeSegment, Operand, Predicate, ResultSet, Row,
    SelectRequest, SqlValue, TableRef,
};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

use crate::to_storage_err;

/// A rendered statement with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSelect {
    pub sql: String,
    pub params: Vec<Value>,
}

struct Renderer {
    params: Vec<Value>,
}

impl Renderer {
    fn bind(&mut self, value: &SqlValue) -> String {
        self.params.push(match value {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(v) => Value::Integer(*v),
            SqlValue::Real(v) => Value::Real(*v),
            SqlValue::Text(s) => Value::Text(s.clone()),
        });
        format!("?{}", self.params.len())
    }

    fn column(&self, column: &ColumnRef) -> Result<String, StorageError> {
        let name = ident(&column.name)?;
        Ok(match &column.table {
            Some(table) => format!("{}.{name}", ident(table)?),
            None => name.to_string(),
        })
    }

    fn expr(&mut self, expr: &Expr) -> Result<String, StorageError> {
        match expr {
            Expr::Column(c) => self.column(c),
            Expr::Replace { expr, from, to } => {
                let inner = self.expr(expr)?;
                let from = self.bind(&SqlValue::Text(from.clone()));
                let to = self.bind(&SqlValue::Text(to.clone()));
                Ok(format!("REPLACE({inner}, {from}, {to})"))
            }
        }
    }

    fn operand(&mut self, operand: &Operand) -> Result<String, StorageError> {
        match operand {
            Operand::Column(c) => self.column(c),
            Operand::Value(v) => Ok(self.bind(v)),
        }
    }

    fn predicate(&mut self, predicate: &Predicate) -> Result<String, StorageError> {
        match predicate {
            Predicate::Equals { left, right } => match (left, right) {
                (other, Operand::Value(SqlValue::Null)) | (Operand::Value(SqlValue::Null), other) => {
                    Ok(format!("{} IS NULL", self.operand(other)?))
                }
                _ => Ok(format!("{} = {}", self.operand(left)?, self.operand(right)?)),
            },
            Predicate::In {
                column,
                values,
                negated,
            } => {
                let column = self.column(column)?;
                if values.is_empty() {
                    // Membership in an empty list is never true.
                    return Ok(if *negated { "1" } else { "0" }.to_string());
                }
                let list = values
                    .iter()
                    .map(|v| self.bind(v))
                    .collect::<Vec<_>>()
                    .join(", ");
                let not = if *negated { "NOT " } else { "" };
                Ok(format!("{column} {not}IN ({list})"))
            }
            Predicate::Like {
                column,
                pattern,
                negated,
            } => {
                let column = self.column(column)?;
                let pattern = self.bind(&SqlValue::Text(glob_pattern(pattern)));
                let not = if *negated { "NOT " } else { "" };
                Ok(format!("{column} {not}GLOB {pattern}"))
            }
        }
    }

    fn table(&self, table: &TableRef) -> Result<String, StorageError> {
        let name = ident(&table.name)?;
        Ok(match &table.alias {
            Some(alias) => format!("{name} AS {}", ident(alias)?),
            None => name.to_string(),
        })
    }
}

/// Table and column names must be plain identifiers.
fn ident(name: &str) -> Result<&str, StorageError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(StorageError::SqliteError {
            message: format!("invalid identifier: {name:?}"),
        })
    }
}

/// Translate a containment pattern to GLOB syntax, escaping metacharacters
/// in literal segments.
pub fn glob_pattern(pattern: &LikePattern) -> String {
    let mut out = String::new();
    for segment in pattern.segments() {
        match segment {
            LikeSegment::AnyString => out.push('*'),
            LikeSegment::Literal(text) => {
                for c in text.chars() {
                    match c {
                        '*' => out.push_str("[*]"),
                        '?' => out.push_str("[?]"),
                        '[' => out.push_str("[[]"),
                        _ => out.push(c),
                    }
                }
            }
        }
    }
    out
}

/// Render a select to SQL. Tables without a join specification form the
/// comma-separated FROM list; joined tables follow in table order.
pub fn render(request: &SelectRequest<'_>) -> Result<RenderedSelect, StorageError> {
    let mut r = Renderer { params: Vec::new() };

    let mut columns = Vec::with_capacity(request.columns.len());
    for column in request.columns {
        let expr = r.expr(&column.expr)?;
        columns.push(match &column.alias {
            Some(alias) => format!("{expr} AS {}", ident(alias)?),
            None => expr,
        });
    }
    if columns.is_empty() {
        columns.push("*".to_string());
    }

    let mut implicit = Vec::new();
    let mut explicit = Vec::new();
    for table in request.tables {
        let rendered = r.table(table)?;
        match request.joins.get(table.key()) {
            None => implicit.push(rendered),
            Some(spec) => {
                let on = spec
                    .conds
                    .iter()
                    .map(|c| r.predicate(c))
                    .collect::<Result<Vec<_>, _>>()?;
                let on = if on.is_empty() {
                    "1".to_string()
                } else {
                    on.join(" AND ")
                };
                explicit.push(format!("{} {rendered} ON ({on})", spec.kind.sql()));
            }
        }
    }
    if implicit.is_empty() {
        return Err(StorageError::SqliteError {
            message: "select has no base table".to_string(),
        });
    }

    let distinct = if request.options.distinct { "DISTINCT " } else { "" };
    let mut sql = format!(
        "SELECT {distinct}{} FROM {}",
        columns.join(", "),
        implicit.join(", ")
    );
    for join in &explicit {
        sql.push(' ');
        sql.push_str(join);
    }

    if !request.conds.is_empty() {
        let conds = request
            .conds
            .iter()
            .map(|c| r.predicate(c).map(|s| format!("({s})")))
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(" WHERE ");
        sql.push_str(&conds.join(" AND "));
    }

    if !request.options.order_by.is_empty() {
        let terms = request
            .options
            .order_by
            .iter()
            .map(|t| r.expr(&t.expr).map(|e| format!("{e} {}", t.order.sql_keyword())))
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(" ORDER BY ");
        sql.push_str(&terms.join(", "));
    }

    if let Some(limit) = request.options.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    Ok(RenderedSelect {
        sql,
        params: r.params,
    })
}

/// Render and run a select, materializing every row.
pub fn run_select(conn: &Connection, request: &SelectRequest<'_>) -> Result<ResultSet, StorageError> {
    let rendered = render(request)?;
    tracing::debug!(sql = %rendered.sql, params = rendered.params.len(), "running select");

    let mut stmt = conn.prepare(&rendered.sql).map_err(to_storage_err)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt
        .query_map(params_from_iter(rendered.params.iter()), |row| {
            let mut out = Row::new();
            for (i, name) in names.iter().enumerate() {
                out.insert(name.clone(), from_value_ref(row.get_ref(i)?));
            }
            Ok(out)
        })
        .map_err(to_storage_err)?;

    let rows = rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)?;
    Ok(ResultSet::new(rows))
}

fn from_value_ref(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(v) => SqlValue::Integer(v),
        ValueRef::Real(v) => SqlValue::Real(v),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            SqlValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
