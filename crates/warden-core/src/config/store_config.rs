//! Knowledge store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DYNAMIC_RULES_FILE, DEFAULT_DYNAMIC_SEED_FILE, DEFAULT_ENTRIES_SEED_FILE,
    WARDEN_DIR,
};

/// Configuration for the knowledge store's seed and durable locations.
///
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Mandatory knowledge-entry seed. Default: `.warden/knowledge_entries.json`.
    pub entries_seed: Option<PathBuf>,
    /// Optional dynamic-rule seed. Default: `.warden/dynamic_rules.seed.json`.
    pub dynamic_seed: Option<PathBuf>,
    /// Durable dynamic-rule file. Default: `.warden/dynamic_rules.json`.
    pub dynamic_rules: Option<PathBuf>,
}

/// Fully resolved store locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub entries_seed: PathBuf,
    pub dynamic_seed: PathBuf,
    pub dynamic_rules: PathBuf,
}

impl StoreConfig {
    /// Resolve every location against `root`, filling in defaults.
    pub fn resolve(&self, root: &Path) -> StorePaths {
        let base = root.join(WARDEN_DIR);
        let pick = |configured: &Option<PathBuf>, default: &str| match configured {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => base.join(default),
        };
        StorePaths {
            entries_seed: pick(&self.entries_seed, DEFAULT_ENTRIES_SEED_FILE),
            dynamic_seed: pick(&self.dynamic_seed, DEFAULT_DYNAMIC_SEED_FILE),
            dynamic_rules: pick(&self.dynamic_rules, DEFAULT_DYNAMIC_RULES_FILE),
        }
    }
}
