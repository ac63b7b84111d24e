//! Error handling for the dynamic page list engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod guard_error;
pub mod param_error;
pub mod query_error;
pub mod result_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::DpleErrorCode;
pub use guard_error::GuardError;
pub use param_error::ParamError;
pub use query_error::QueryError;
pub use result_error::ResultError;
pub use storage_error::StorageError;
