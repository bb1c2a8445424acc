//! Shared constants.

/// Project-local Warden directory.
pub const WARDEN_DIR: &str = ".warden";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "warden.toml";

pub const DEFAULT_ENTRIES_SEED_FILE: &str = "knowledge_entries.json";
pub const DEFAULT_DYNAMIC_SEED_FILE: &str = "dynamic_rules.seed.json";
pub const DEFAULT_DYNAMIC_RULES_FILE: &str = "dynamic_rules.json";

pub const DEFAULT_PATTERN_CACHE_CAPACITY: u64 = 1_024;
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Smallest regex size limit accepted by config validation.
pub const MIN_REGEX_SIZE_LIMIT: usize = 1 << 10;

/// Provenance tag for rules derived from change records.
pub const SOURCE_AUTO_GENERATED: &str = "auto-generated-from-change";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "WARDEN_LOG";
