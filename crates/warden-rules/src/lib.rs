//! # warden-rules
//!
//! Pattern rules and the two pure components that work on them:
//! - `model` — pattern rules, dynamic rules with review status, change records
//! - `matcher` — regex compile-or-skip matching, stable severity ordering
//! - `generator` — change record → draft dynamic rule

pub mod generator;
pub mod matcher;
pub mod model;

pub use generator::{generate_rule, RuleGenerator};
pub use matcher::{match_rules, sort_by_severity, RuleMatcher};
pub use model::{
    ChangeCategory, ChangeRecord, DynamicRule, FixSuggestion, PatternRule, ReviewStatus,
    Severity,
};
