//! # warden-core
//!
//! Foundation crate for the Warden rule advisor.
//! Errors, configuration, events, tracing setup, and shared constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;

pub use config::{MatcherConfig, StoreConfig, StorePaths, WardenConfig};
pub use errors::{ConfigError, RuleError, StoreError, StoreResult, WardenErrorCode};
