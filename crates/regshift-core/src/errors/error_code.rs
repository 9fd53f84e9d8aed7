//! RegshiftErrorCode trait for structured error reporting.

/// Stable error code for consumers that cannot match on Rust types
/// (report writers, wrapping CLIs).
pub trait RegshiftErrorCode {
    /// Returns the error code string (e.g., "INGEST_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const INGESTION_ABORTED: &str = "INGESTION_ABORTED";
pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
