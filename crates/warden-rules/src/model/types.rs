//! Core types for pattern rules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::errors::RuleError;

use crate::matcher::compile_pattern;

/// Severity levels for rules, ordered `Warning < Error < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(RuleError::Decode {
                input: "severity".to_string(),
                message: format!("unknown severity '{other}'"),
            }),
        }
    }
}

/// A before/after example attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub before: String,
    pub after: String,
    pub explanation: String,
}

/// A single match rule: a regex over raw source text plus remediation data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRule {
    pub id: String,
    /// Regex matched in multi-line mode against the submitted code.
    pub pattern: String,
    pub description: String,
    /// Key into the remediation knowledge; may reference a missing entry.
    pub correction_id: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<FixSuggestion>,
}

impl PatternRule {
    /// Check that the pattern compiles. Matching never calls this; review
    /// tooling does.
    pub fn validate(&self) -> Result<(), RuleError> {
        compile_pattern(&self.pattern)
            .map(|_| ())
            .map_err(|e| match e {
                RuleError::InvalidPattern { message, .. } => RuleError::InvalidPattern {
                    rule_id: self.id.clone(),
                    message,
                },
                other => other,
            })
    }
}

/// Review lifecycle of a dynamic rule. Only `Approved` rules are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Draft,
    Reviewed,
    Approved,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [Self::Draft, Self::Reviewed, Self::Approved];

    /// Whether rules in this status participate in matching.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "reviewed" => Ok(Self::Reviewed),
            "approved" => Ok(Self::Approved),
            other => Err(RuleError::Decode {
                input: "review status".to_string(),
                message: format!("unknown review status '{other}'"),
            }),
        }
    }
}

/// A pattern rule with provenance and review metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicRule {
    #[serde(flatten)]
    pub rule: PatternRule,
    #[serde(default)]
    pub review_status: ReviewStatus,
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub source_release: String,
}

impl DynamicRule {
    pub fn id(&self) -> &str {
        &self.rule.id
    }

    pub fn is_active(&self) -> bool {
        self.review_status.is_active()
    }

    /// The common pattern-rule shape used by the matcher.
    pub fn to_pattern_rule(&self) -> PatternRule {
        self.rule.clone()
    }

    /// Rebuild with a new status; every other field is unchanged.
    pub fn with_status(&self, status: ReviewStatus) -> Self {
        Self {
            review_status: status,
            ..self.clone()
        }
    }
}
