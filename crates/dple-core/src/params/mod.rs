//! Request parameters and the pure parsers features use on them.

pub mod numeric;
pub mod parameter_set;
pub mod parsers;
pub mod value;

pub use parameter_set::ParameterSet;
pub use parsers::{
    array_to_titles, parse_include_exclude, parse_include_exclude_or, parse_namespace,
    parse_order, parse_text, parse_title_substring, parse_user, IncludeExclude,
};
pub use value::{ParamValue, Scalar};
