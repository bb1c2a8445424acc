//! Knowledge entries: freeform advisory records keyed by id.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::errors::StoreError;

/// Architectural layer an entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureLayer {
    Presentation,
    Application,
    Domain,
    Data,
    Infrastructure,
}

impl fmt::Display for ArchitectureLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Presentation => "presentation",
            Self::Application => "application",
            Self::Domain => "domain",
            Self::Data => "data",
            Self::Infrastructure => "infrastructure",
        };
        f.write_str(s)
    }
}

/// Half-open version range `[from, until)`; a missing bound is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

impl VersionRange {
    pub fn contains(&self, version: &str) -> bool {
        let above = self
            .from
            .as_deref()
            .map_or(true, |from| compare_versions(version, from) != Ordering::Less);
        let below = self
            .until
            .as_deref()
            .map_or(true, |until| compare_versions(version, until) == Ordering::Less);
        above && below
    }
}

/// Compare dotted versions numerically, component by component.
/// Missing components count as zero; non-numeric suffixes are ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    fn components(v: &str) -> Vec<u64> {
        v.trim()
            .trim_start_matches(['v', 'V'])
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    }
    let (a, b) = (components(a), components(b));
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// A freeform advisory record. Not a matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<ArchitectureLayer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pattern_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violation_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicability: Vec<VersionRange>,
    /// True when the entry documents an anti-pattern example rather than a
    /// recommendation.
    #[serde(default)]
    pub is_tutorial_pattern: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_id: Option<String>,
    pub confidence: f64,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl KnowledgeEntry {
    /// Check the entry invariants: non-empty id, confidence in [0, 1], and
    /// a correction id on anti-pattern examples.
    pub fn validate(&self) -> Result<(), StoreError> {
        let invalid = |message: &str| StoreError::InvalidEntry {
            id: self.id.clone(),
            message: message.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(invalid("confidence must be between 0.0 and 1.0"));
        }
        if self.is_tutorial_pattern
            && self
                .correction_id
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(invalid("anti-pattern entries require a correctionId"));
        }
        Ok(())
    }

    /// Pitfalls are recommendations, i.e. not anti-pattern examples.
    pub fn is_pitfall(&self) -> bool {
        !self.is_tutorial_pattern
    }

    /// Whether the entry applies to `version`. No ranges means always.
    pub fn applies_to(&self, version: &str) -> bool {
        self.applicability.is_empty() || self.applicability.iter().any(|r| r.contains(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            id: id.to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            layer: None,
            pattern_ids: vec![],
            violation_ids: vec![],
            applicability: vec![],
            is_tutorial_pattern: false,
            correction_id: None,
            confidence: 0.5,
            source: "seed".to_string(),
            last_verified_at: None,
        }
    }

    #[test]
    fn version_comparison() {
        assert_eq!(compare_versions("1.2", "1.10"), Ordering::Less);
        assert_eq!(compare_versions("2.0", "2"), Ordering::Equal);
        assert_eq!(compare_versions("v3.1.0", "3.0.9"), Ordering::Greater);
        assert_eq!(compare_versions("17.0-beta", "17.0"), Ordering::Equal);
    }

    #[test]
    fn range_is_half_open() {
        let range = VersionRange {
            from: Some("2.0".to_string()),
            until: Some("3.0".to_string()),
        };
        assert!(!range.contains("1.9"));
        assert!(range.contains("2.0"));
        assert!(range.contains("2.9.9"));
        assert!(!range.contains("3.0"));
    }

    #[test]
    fn tutorial_requires_correction() {
        let mut e = entry("anti");
        e.is_tutorial_pattern = true;
        assert!(e.validate().is_err());
        e.correction_id = Some("fix-anti".to_string());
        assert!(e.validate().is_ok());
    }

    #[test]
    fn confidence_out_of_range() {
        let mut e = entry("x");
        e.confidence = 1.5;
        assert!(e.validate().is_err());
        e.confidence = f64::NAN;
        assert!(e.validate().is_err());
    }

    #[test]
    fn applicability() {
        let mut e = entry("x");
        assert!(e.applies_to("0.1"));
        e.applicability = vec![VersionRange {
            from: Some("5".to_string()),
            until: None,
        }];
        assert!(!e.applies_to("4.9"));
        assert!(e.applies_to("6"));
    }
}
