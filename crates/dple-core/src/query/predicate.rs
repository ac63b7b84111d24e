//! WHERE / ON predicates.

use std::fmt;

use super::SqlValue;

/// A column, optionally qualified by a table alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{table}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(ColumnRef),
    Value(SqlValue),
}

impl From<ColumnRef> for Operand {
    fn from(c: ColumnRef) -> Self {
        Self::Column(c)
    }
}

impl From<SqlValue> for Operand {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

/// One piece of a LIKE pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeSegment {
    /// Any run of characters, possibly empty.
    AnyString,
    /// Characters matched verbatim, wildcards included.
    Literal(String),
}

/// A substring pattern built from literal text and wildcards. Literal
/// segments never carry wildcard meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LikePattern {
    segments: Vec<LikeSegment>,
}

impl LikePattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// `%text%`
    pub fn containing(text: impl Into<String>) -> Self {
        Self::new().any().literal(text).any()
    }

    pub fn any(mut self) -> Self {
        self.segments.push(LikeSegment::AnyString);
        self
    }

    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.segments.push(LikeSegment::Literal(text.into()));
        self
    }

    pub fn segments(&self) -> &[LikeSegment] {
        &self.segments
    }

    /// Reference matcher with the same semantics storage uses (case-sensitive).
    pub fn matches(&self, haystack: &str) -> bool {
        fn go(segments: &[LikeSegment], rest: &str) -> bool {
            match segments.split_first() {
                None => rest.is_empty(),
                Some((LikeSegment::Literal(lit), tail)) => {
                    rest.strip_prefix(lit.as_str()).is_some_and(|r| go(tail, r))
                }
                Some((LikeSegment::AnyString, tail)) => rest
                    .char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(rest.len()))
                    .any(|i| go(tail, &rest[i..])),
            }
        }
        go(&self.segments, haystack)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `left = right`; a `Null` right-hand value means `IS NULL`.
    Equals { left: Operand, right: Operand },
    In {
        column: ColumnRef,
        values: Vec<SqlValue>,
        negated: bool,
    },
    Like {
        column: ColumnRef,
        pattern: LikePattern,
        negated: bool,
    },
}

impl Predicate {
    pub fn eq(column: ColumnRef, value: impl Into<SqlValue>) -> Self {
        Self::Equals {
            left: Operand::Column(column),
            right: Operand::Value(value.into()),
        }
    }

    pub fn columns_eq(left: ColumnRef, right: ColumnRef) -> Self {
        Self::Equals {
            left: Operand::Column(left),
            right: Operand::Column(right),
        }
    }

    pub fn is_null(column: ColumnRef) -> Self {
        Self::eq(column, SqlValue::Null)
    }

    pub fn in_list(column: ColumnRef, values: Vec<SqlValue>) -> Self {
        Self::In {
            column,
            values,
            negated: false,
        }
    }

    pub fn not_in_list(column: ColumnRef, values: Vec<SqlValue>) -> Self {
        Self::In {
            column,
            values,
            negated: true,
        }
    }

    pub fn like(column: ColumnRef, pattern: LikePattern) -> Self {
        Self::Like {
            column,
            pattern,
            negated: false,
        }
    }

    pub fn not_like(column: ColumnRef, pattern: LikePattern) -> Self {
        Self::Like {
            column,
            pattern,
            negated: true,
        }
    }
}
