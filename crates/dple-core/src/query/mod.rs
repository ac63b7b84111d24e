//! Structured select queries.
//!
//! Features describe their contribution as data: tables, columns,
//! predicates, join conditions and options. The storage crate renders
//! the accumulated request to SQL with bound parameters.

pub mod accumulator;
pub mod predicate;
pub mod result;
pub mod select;
pub mod value;

pub use accumulator::DpleQuery;
pub use predicate::{ColumnRef, LikePattern, LikeSegment, Operand, Predicate};
pub use result::{ResultSet, Row};
pub use select::{
    Column, Expr, JoinConds, JoinKind, JoinSpec, OrderTerm, QueryOption, QueryOptions,
    SelectRequest, TableRef,
};
pub use value::SqlValue;
