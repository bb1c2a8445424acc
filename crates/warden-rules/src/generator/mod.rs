//! Rule generator: change record → draft dynamic rule.
//!
//! Total and side-effect free. Every input, including empty, whitespace-only
//! and non-ASCII API names, yields a well-formed rule whose pattern compiles.

pub mod naming;
pub mod pattern;
pub mod text;

use chrono::{DateTime, Utc};
use warden_core::constants::SOURCE_AUTO_GENERATED;

use crate::model::{ChangeRecord, DynamicRule, PatternRule, ReviewStatus};
use pattern::ApiShape;

pub use naming::{correction_id, rule_id};
pub use pattern::{derive_pattern, escape_regex};

/// Builds draft rules from change records.
#[derive(Debug, Clone)]
pub struct RuleGenerator {
    source: String,
}

impl RuleGenerator {
    pub fn new() -> Self {
        Self {
            source: SOURCE_AUTO_GENERATED.to_string(),
        }
    }

    /// Use a different provenance tag for generated rules.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Generate a draft rule stamped with the current time.
    pub fn generate(&self, change: &ChangeRecord, release: &str) -> DynamicRule {
        self.generate_at(change, release, Utc::now())
    }

    /// Generate a draft rule stamped with `generated_at`.
    pub fn generate_at(
        &self,
        change: &ChangeRecord,
        release: &str,
        generated_at: DateTime<Utc>,
    ) -> DynamicRule {
        let shape = ApiShape::classify(&change.deprecated_api);
        let rule = PatternRule {
            id: rule_id(&change.deprecated_api, release),
            pattern: derive_pattern(&change.deprecated_api),
            description: text::describe(change),
            correction_id: correction_id(&change.deprecated_api, change.category),
            severity: change.category.severity(),
            fix_suggestion: text::fix_suggestion(change, shape),
        };
        tracing::debug!(rule_id = %rule.id, severity = %rule.severity, "generated draft rule");

        DynamicRule {
            rule,
            review_status: ReviewStatus::Draft,
            source: self.source.clone(),
            generated_at,
            source_release: release.to_string(),
        }
    }

    /// Generate one draft per record, all stamped with the same time.
    pub fn generate_all(&self, changes: &[ChangeRecord], release: &str) -> Vec<DynamicRule> {
        let now = Utc::now();
        changes
            .iter()
            .map(|change| self.generate_at(change, release, now))
            .collect()
    }
}

impl Default for RuleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a draft rule with the default provenance tag.
pub fn generate_rule(change: &ChangeRecord, release: &str) -> DynamicRule {
    RuleGenerator::new().generate(change, release)
}
