//! SentinelErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so callers (CLI exit messages, gateway
/// JSON bodies, log fields) can report a structured code alongside the text.
pub trait SentinelErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const RENDERER_ERROR: &str = "RENDERER_ERROR";
pub const SCANNER_ERROR: &str = "SCANNER_ERROR";
pub const DELIVERY_ERROR: &str = "DELIVERY_ERROR";
pub const AUTH_FAILED: &str = "AUTH_FAILED";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const QUEUE_UNAVAILABLE: &str = "QUEUE_UNAVAILABLE";
pub const INVALID_TARGET: &str = "INVALID_TARGET";
pub const RELAY_FAILED: &str = "RELAY_FAILED";
