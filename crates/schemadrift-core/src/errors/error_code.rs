//! Stable error codes for report consumers.

/// Every error enum exposes a machine-readable code so that hosts rendering
/// reports (dashboards, JSON files) can bucket failures without parsing
/// display strings.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "FILE_READ_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_READ_ERROR: &str = "CONFIG_READ_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
pub const CONTRACT_PARSE_ERROR: &str = "CONTRACT_PARSE_ERROR";
pub const CONTRACT_READ_ERROR: &str = "CONTRACT_READ_ERROR";
pub const UNSUPPORTED_FORMAT: &str = "UNSUPPORTED_FORMAT";
pub const FILE_READ_ERROR: &str = "FILE_READ_ERROR";
pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
pub const INVALID_ENCODING: &str = "INVALID_ENCODING";
pub const FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
