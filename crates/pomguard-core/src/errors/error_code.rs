//! Structured error codes shared by every error enum.

/// Every error enum implements this so callers (the CLI, CSV rows, logs)
/// get a stable code string next to the human message.
pub trait GuardErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const HOST_ERROR: &str = "HOST_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const PATCH_ERROR: &str = "PATCH_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
