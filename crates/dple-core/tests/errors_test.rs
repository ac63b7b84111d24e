//! Tests for error codes and boundary rendering.

use dple_core::errors::{
    DpleErrorCode, EngineError, GuardError, ParamError, QueryError, ResultError, StorageError,
};

/// Every category carries its code and message key.
#[test]
fn test_codes_and_keys() {
    let err = ParamError::InvalidNamespace { index: 99 };
    assert_eq!(err.error_code(), "INVALID_NAMESPACE");
    assert_eq!(err.message_key(), "dple-error-invalid-ns-index");
    assert_eq!(err.message_params(), vec!["99".to_string()]);

    let err = GuardError::NoSelectionCriteria;
    assert_eq!(err.error_code(), "NO_CRITERIA");
    assert_eq!(err.message_key(), "dple-error-no-criteria");

    let err = ResultError::UnknownConverter { name: "toXml".into() };
    assert_eq!(err.error_code(), "UNKNOWN_CONVERTER");
    assert_eq!(err.message_key(), "dple-error-unknown-converter");
}

/// Cost errors expose both numbers for display.
#[test]
fn test_cost_exceeded_params() {
    let err = GuardError::CostExceeded { total: 7, max: 6 };
    assert_eq!(err.message_params(), vec!["7".to_string(), "6".to_string()]);
    assert_eq!(err.message_key(), "dple-error-too-expensive");
    assert!(err.boundary_string().starts_with("[TOO_EXPENSIVE]"));
}

/// Engine errors delegate to the wrapped subsystem error.
#[test]
fn test_engine_error_delegates() {
    let err: EngineError = GuardError::CostExceeded { total: 2, max: 1 }.into();
    assert_eq!(err.error_code(), "TOO_EXPENSIVE");
    assert_eq!(err.message_params().len(), 2);

    let err: EngineError = QueryError::Storage(StorageError::SqliteError {
        message: "disk I/O error".into(),
    })
    .into();
    assert_eq!(err.error_code(), "STORAGE_ERROR");
}
