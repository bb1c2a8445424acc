//! Knowledge store errors.

use super::error_code::{self, WardenErrorCode};
use super::rule_error::RuleError;

/// Errors surfaced by the knowledge store.
///
/// `SeedMissing`, `SeedMalformed` and `DurableCorrupt` are startup-fatal:
/// the store is never constructed when one of them occurs.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mandatory seed not found: {path}")]
    SeedMissing { path: String },

    #[error("seed {path} is malformed: {message}")]
    SeedMalformed { path: String, message: String },

    #[error("durable dynamic-rule file {path} is corrupt: {message}")]
    DurableCorrupt { path: String, message: String },

    #[error("failed to persist {path}: {message}")]
    Persistence { path: String, message: String },

    #[error("dynamic rule not found: {id}")]
    RuleNotFound { id: String },

    #[error("invalid knowledge entry '{id}': {message}")]
    InvalidEntry { id: String, message: String },

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),
}

impl StoreError {
    /// True for errors that only occur while opening the store.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            Self::SeedMissing { .. } | Self::SeedMalformed { .. } | Self::DurableCorrupt { .. }
        )
    }
}

impl WardenErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SeedMissing { .. } => error_code::SEED_MISSING,
            Self::SeedMalformed { .. } => error_code::SEED_MALFORMED,
            Self::DurableCorrupt { .. } => error_code::STORE_CORRUPT,
            Self::Persistence { .. } => error_code::PERSISTENCE_ERROR,
            Self::RuleNotFound { .. } => error_code::RULE_NOT_FOUND,
            Self::InvalidEntry { .. } => error_code::INVALID_ENTRY,
            Self::Rule(e) => e.error_code(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
