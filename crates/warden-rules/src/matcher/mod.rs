//! Rule matcher: regex compile-or-skip, first-match semantics, stable
//! severity ordering.

pub mod compile;
pub mod rule_matcher;

pub use compile::{compile_pattern, compile_pattern_with_limit};
pub use rule_matcher::{match_rules, sort_by_severity, RuleMatcher};
