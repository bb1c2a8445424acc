//! Rule data model: pattern rules, dynamic rules, and change records.

pub mod change;
pub mod types;

pub use change::{ChangeCategory, ChangeRecord};
pub use types::{DynamicRule, FixSuggestion, PatternRule, ReviewStatus, Severity};
