//! WardenErrorCode trait for the transport boundary.

/// Trait for converting Warden errors to structured error codes.
/// Every error enum implements this so the surrounding tool layer can
/// surface a stable code string alongside the message.
pub trait WardenErrorCode {
    /// Returns the error code string (e.g., "RULE_NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the transport boundary.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const DECODE_ERROR: &str = "DECODE_ERROR";
pub const SEED_MISSING: &str = "SEED_MISSING";
pub const SEED_MALFORMED: &str = "SEED_MALFORMED";
pub const STORE_CORRUPT: &str = "STORE_CORRUPT";
pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
pub const RULE_NOT_FOUND: &str = "RULE_NOT_FOUND";
pub const INVALID_ENTRY: &str = "INVALID_ENTRY";
