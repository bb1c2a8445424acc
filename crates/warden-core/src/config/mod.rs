//! Configuration system for Warden.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod matcher_config;
pub mod store_config;
pub mod warden_config;

pub use matcher_config::MatcherConfig;
pub use store_config::{StoreConfig, StorePaths};
pub use warden_config::{ConfigOverrides, WardenConfig};
