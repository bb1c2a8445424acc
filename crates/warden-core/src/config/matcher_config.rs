//! Rule matcher configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PATTERN_CACHE_CAPACITY, DEFAULT_REGEX_SIZE_LIMIT};

/// Configuration for the regex-based rule matcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatcherConfig {
    /// Max compiled patterns kept in the compile cache. Default: 1024.
    pub cache_capacity: Option<u64>,
    /// Max compiled regex program size in bytes. Default: 1 MiB.
    pub regex_size_limit: Option<usize>,
}

impl MatcherConfig {
    /// Returns the compile cache capacity, defaulting to 1024.
    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity.unwrap_or(DEFAULT_PATTERN_CACHE_CAPACITY)
    }

    /// Returns the regex size limit, defaulting to 1 MiB.
    pub fn effective_regex_size_limit(&self) -> usize {
        self.regex_size_limit.unwrap_or(DEFAULT_REGEX_SIZE_LIMIT)
    }
}
