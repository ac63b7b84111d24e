//! DpleErrorCode trait for the boundary layer.

/// Trait for converting engine errors to short machine-checkable codes.
/// Every error enum implements this so a boundary layer can dispatch on
/// the category and render localized text from the message key.
pub trait DpleErrorCode {
    /// Returns the error code string (e.g., "NO_CRITERIA").
    fn error_code(&self) -> &'static str;

    /// Message key for localized rendering, e.g. `dple-error-no-criteria`.
    fn message_key(&self) -> &'static str;

    /// Positional parameters for the localized message.
    fn message_params(&self) -> Vec<String> {
        Vec::new()
    }

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the boundary.
pub const INVALID_NAMESPACE: &str = "INVALID_NAMESPACE";
pub const NO_CRITERIA: &str = "NO_CRITERIA";
pub const TOO_EXPENSIVE: &str = "TOO_EXPENSIVE";
pub const UNKNOWN_CONVERTER: &str = "UNKNOWN_CONVERTER";
pub const ALREADY_EXECUTED: &str = "ALREADY_EXECUTED";
pub const NOT_EXECUTED: &str = "NOT_EXECUTED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

// Message keys.
pub const MSG_INVALID_NS_INDEX: &str = "dple-error-invalid-ns-index";
pub const MSG_NO_CRITERIA: &str = "dple-error-no-criteria";
pub const MSG_TOO_EXPENSIVE: &str = "dple-error-too-expensive";
pub const MSG_UNKNOWN_CONVERTER: &str = "dple-error-unknown-converter";
pub const MSG_INTERNAL: &str = "dple-error-internal";
