//! Pattern compilation.

use regex::{Regex, RegexBuilder};
use warden_core::constants::DEFAULT_REGEX_SIZE_LIMIT;
use warden_core::errors::RuleError;

/// Compile a rule pattern in multi-line mode (`^`/`$` at line boundaries).
pub fn compile_pattern(pattern: &str) -> Result<Regex, RuleError> {
    compile_pattern_with_limit(pattern, DEFAULT_REGEX_SIZE_LIMIT)
}

/// Compile with an explicit bound on the compiled program size.
pub fn compile_pattern_with_limit(pattern: &str, size_limit: usize) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .size_limit(size_limit)
        .build()
        .map_err(|e| RuleError::InvalidPattern {
            rule_id: String::new(),
            message: e.to_string(),
        })
}
