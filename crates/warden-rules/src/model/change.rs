//! Change records: structured "this API changed" notices consumed by the generator.

use std::fmt;

use serde::{Deserialize, Serialize};
use warden_core::errors::RuleError;

use super::types::Severity;

/// What happened to an API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Removed,
    Renamed,
    Changed,
}

impl ChangeCategory {
    /// Past-tense verb used in generated descriptions.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Changed => "changed",
        }
    }

    /// Removed APIs break builds outright; renames and behavioral changes
    /// are advisory.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Removed => Severity::Error,
            Self::Renamed | Self::Changed => Severity::Warning,
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// One API-level change, as parsed by the external ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    #[serde(rename = "deprecatedAPI")]
    pub deprecated_api: String,
    #[serde(rename = "replacementAPI", default, skip_serializing_if = "Option::is_none")]
    pub replacement_api: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: ChangeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_guidance: Option<String>,
}

impl ChangeRecord {
    pub fn new(deprecated_api: impl Into<String>, category: ChangeCategory) -> Self {
        Self {
            deprecated_api: deprecated_api.into(),
            replacement_api: None,
            description: String::new(),
            category,
            migration_guidance: None,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement_api = Some(replacement.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.migration_guidance = Some(guidance.into());
        self
    }

    /// Decode a caller-supplied JSON record.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        serde_json::from_str(json).map_err(|e| RuleError::Decode {
            input: "change record".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode a JSON array of records.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, RuleError> {
        serde_json::from_str(json).map_err(|e| RuleError::Decode {
            input: "change record list".to_string(),
            message: e.to_string(),
        })
    }
}
