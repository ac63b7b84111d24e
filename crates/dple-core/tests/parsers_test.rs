//! Property tests for the parameter parsers.

use dple_core::params::numeric::{int_value_str, is_numeric_str};
use dple_core::params::{
    parse_include_exclude, parse_include_exclude_or, parse_namespace, IncludeExclude, ParamValue,
    Scalar,
};
use dple_core::traits::NamespaceTable;
use dple_core::types::NamespaceRegistry;
use proptest::prelude::*;

fn include_exclude_strategy() -> impl Strategy<Value = IncludeExclude> {
    prop_oneof![
        Just(IncludeExclude::Include),
        Just(IncludeExclude::Exclude),
        Just(IncludeExclude::Only),
    ]
}

proptest! {
    /// Non-numeric names that do not resolve map to the main namespace.
    #[test]
    fn prop_unknown_namespace_names_map_to_main(name in "[A-Za-z][A-Za-z ]{0,20}") {
        let ns = NamespaceRegistry::standard();
        prop_assume!(ns.index_by_name(&name).is_none());
        prop_assert_eq!(parse_namespace(&Scalar::from(name.as_str()), &ns), Ok(0));
    }

    /// Numeric indexes outside the namespace table always fail.
    #[test]
    fn prop_unknown_namespace_indexes_fail(index in -1000i64..1000) {
        let ns = NamespaceRegistry::standard();
        prop_assume!(!(-2..=15).contains(&index));
        prop_assert!(parse_namespace(&Scalar::from(index), &ns).is_err());
        prop_assert!(parse_namespace(&Scalar::from(index.to_string()), &ns).is_err());
    }

    /// Values outside the three keywords yield the supplied default.
    #[test]
    fn prop_include_exclude_default(value in "\\PC{0,12}", default in include_exclude_strategy()) {
        prop_assume!(IncludeExclude::from_name(&value).is_none());
        let param = ParamValue::from(value.as_str());
        prop_assert_eq!(parse_include_exclude_or(Some(&param), default), default);
        prop_assert_eq!(parse_include_exclude(Some(&param)), IncludeExclude::Exclude);
    }

    /// Integer strings convert to their own value.
    #[test]
    fn prop_int_value_of_integers(n in any::<i32>()) {
        prop_assert!(is_numeric_str(&n.to_string()));
        prop_assert_eq!(int_value_str(&n.to_string()), i64::from(n));
    }
}
