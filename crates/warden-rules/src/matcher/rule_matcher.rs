//! Severity-ordered rule matcher with a bounded compile cache.

use std::borrow::Borrow;

use moka::sync::Cache;
use regex::Regex;
use warden_core::config::MatcherConfig;

use super::compile::compile_pattern_with_limit;
use crate::model::PatternRule;

/// Matches code against rule patterns.
///
/// Compiled patterns are cached by their source text; a pattern that does
/// not compile is cached as `None` and never matches. The cache never
/// changes results, so matching stays a pure function of `(code, rules)`.
pub struct RuleMatcher {
    compiled: Cache<String, Option<Regex>>,
    size_limit: usize,
}

impl RuleMatcher {
    pub fn new() -> Self {
        Self::with_config(&MatcherConfig::default())
    }

    pub fn with_config(config: &MatcherConfig) -> Self {
        Self {
            compiled: Cache::new(config.effective_cache_capacity()),
            size_limit: config.effective_regex_size_limit(),
        }
    }

    /// Override the compiled-program size limit.
    pub fn with_regex_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self.compiled.invalidate_all();
        self
    }

    /// Compile (or fetch) a pattern. `None` means "never matches".
    fn regex_for(&self, pattern: &str) -> Option<Regex> {
        if let Some(cached) = self.compiled.get(pattern) {
            return cached;
        }
        let compiled = match compile_pattern_with_limit(pattern, self.size_limit) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::debug!(pattern, error = %e, "skipping rule with invalid pattern");
                None
            }
        };
        self.compiled.insert(pattern.to_string(), compiled.clone());
        compiled
    }

    /// Whether `rule` fires anywhere in `code`.
    pub fn matches(&self, code: &str, rule: &PatternRule) -> bool {
        self.regex_for(&rule.pattern)
            .is_some_and(|re| re.is_match(code))
    }

    /// Rules that fire on `code`, borrowed from the input and ordered by
    /// severity (critical first). Equal severities keep input order;
    /// duplicate ids are evaluated independently.
    pub fn find_matches<'r, I>(&self, code: &str, rules: I) -> Vec<&'r PatternRule>
    where
        I: IntoIterator<Item = &'r PatternRule>,
    {
        let mut hits: Vec<&PatternRule> = rules
            .into_iter()
            .filter(|rule| self.matches(code, rule))
            .collect();
        sort_by_severity(&mut hits);
        hits
    }

    /// Owned variant of [`find_matches`](Self::find_matches).
    pub fn match_rules(&self, code: &str, rules: &[PatternRule]) -> Vec<PatternRule> {
        self.find_matches(code, rules)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl Default for RuleMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable sort, highest severity first.
pub fn sort_by_severity<T: Borrow<PatternRule>>(rules: &mut [T]) {
    rules.sort_by(|a, b| b.borrow().severity.cmp(&a.borrow().severity));
}

/// One-shot matching without a long-lived cache.
pub fn match_rules(code: &str, rules: &[PatternRule]) -> Vec<PatternRule> {
    RuleMatcher::with_config(&MatcherConfig {
        cache_capacity: Some(rules.len().max(1) as u64),
        regex_size_limit: None,
    })
    .match_rules(code, rules)
}
