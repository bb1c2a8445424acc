//! Rule model and decoding errors.

use super::error_code::{self, WardenErrorCode};

/// Errors raised by explicit rule validation and by decoding caller input.
///
/// Matching never produces these: a pattern that fails to compile simply
/// never matches.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("rule '{rule_id}' has an invalid pattern: {message}")]
    InvalidPattern { rule_id: String, message: String },

    #[error("failed to decode {input}: {message}")]
    Decode { input: String, message: String },
}

impl WardenErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            Self::Decode { .. } => error_code::DECODE_ERROR,
        }
    }
}
