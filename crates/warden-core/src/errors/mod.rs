//! Error handling for Warden.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod rule_error;
pub mod store_error;

pub use config_error::ConfigError;
pub use error_code::WardenErrorCode;
pub use rule_error::RuleError;
pub use store_error::{StoreError, StoreResult};
