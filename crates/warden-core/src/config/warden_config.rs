//! Top-level Warden configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{MatcherConfig, StoreConfig};
use crate::constants::{MIN_REGEX_SIZE_LIMIT, PROJECT_CONFIG_FILE, WARDEN_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`WARDEN_*`)
/// 3. Project config (`warden.toml` in project root)
/// 4. User config (`~/.warden/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WardenConfig {
    pub store: StoreConfig,
    pub matcher: MatcherConfig,
}

/// Explicit overrides supplied by the embedding process.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub entries_seed: Option<PathBuf>,
    pub dynamic_rules: Option<PathBuf>,
    pub cache_capacity: Option<u64>,
}

impl WardenConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &WardenConfig) -> Result<(), ConfigError> {
        if config.matcher.cache_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "matcher.cache_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(limit) = config.matcher.regex_size_limit {
            if limit < MIN_REGEX_SIZE_LIMIT {
                return Err(ConfigError::ValidationFailed {
                    field: "matcher.regex_size_limit".to_string(),
                    message: format!("must be at least {MIN_REGEX_SIZE_LIMIT} bytes"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.warden/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(WARDEN_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut WardenConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: WardenConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut WardenConfig, other: &WardenConfig) {
        if other.store.entries_seed.is_some() {
            base.store.entries_seed = other.store.entries_seed.clone();
        }
        if other.store.dynamic_seed.is_some() {
            base.store.dynamic_seed = other.store.dynamic_seed.clone();
        }
        if other.store.dynamic_rules.is_some() {
            base.store.dynamic_rules = other.store.dynamic_rules.clone();
        }
        if other.matcher.cache_capacity.is_some() {
            base.matcher.cache_capacity = other.matcher.cache_capacity;
        }
        if other.matcher.regex_size_limit.is_some() {
            base.matcher.regex_size_limit = other.matcher.regex_size_limit;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `WARDEN_STORE_ENTRIES_SEED`, `WARDEN_MATCHER_CACHE_CAPACITY`, etc.
    fn apply_env_overrides(config: &mut WardenConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("WARDEN_STORE_ENTRIES_SEED") {
            config.store.entries_seed = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("WARDEN_STORE_DYNAMIC_SEED") {
            config.store.dynamic_seed = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("WARDEN_STORE_DYNAMIC_RULES") {
            config.store.dynamic_rules = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("WARDEN_MATCHER_CACHE_CAPACITY") {
            let v = val.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: "WARDEN_MATCHER_CACHE_CAPACITY".to_string(),
                message: e.to_string(),
            })?;
            config.matcher.cache_capacity = Some(v);
        }
        if let Ok(val) = std::env::var("WARDEN_MATCHER_REGEX_SIZE_LIMIT") {
            let v = val.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                field: "WARDEN_MATCHER_REGEX_SIZE_LIMIT".to_string(),
                message: e.to_string(),
            })?;
            config.matcher.regex_size_limit = Some(v);
        }
        Ok(())
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut WardenConfig, o: &ConfigOverrides) {
        if let Some(ref v) = o.entries_seed {
            config.store.entries_seed = Some(v.clone());
        }
        if let Some(ref v) = o.dynamic_rules {
            config.store.dynamic_rules = Some(v.clone());
        }
        if let Some(v) = o.cache_capacity {
            config.matcher.cache_capacity = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
