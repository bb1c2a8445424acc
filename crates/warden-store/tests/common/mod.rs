//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use warden_core::config::StorePaths;
use warden_rules::{DynamicRule, PatternRule, ReviewStatus, Severity};
use warden_store::{KnowledgeEntry, KnowledgeStore};

pub fn rule(id: &str, pattern: &str, severity: Severity) -> PatternRule {
    PatternRule {
        id: id.to_string(),
        pattern: pattern.to_string(),
        description: format!("rule {id}"),
        correction_id: format!("fix-{id}"),
        severity,
        fix_suggestion: None,
    }
}

pub fn dynamic(id: &str, pattern: &str, severity: Severity, status: ReviewStatus) -> DynamicRule {
    DynamicRule {
        rule: rule(id, pattern, severity),
        review_status: status,
        source: "test".to_string(),
        generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        source_release: "1.0".to_string(),
    }
}

pub fn entry(id: &str, confidence: f64) -> KnowledgeEntry {
    KnowledgeEntry {
        id: id.to_string(),
        title: format!("Entry {id}"),
        content: format!("Content for {id}."),
        layer: None,
        pattern_ids: vec![],
        violation_ids: vec![],
        applicability: vec![],
        is_tutorial_pattern: false,
        correction_id: None,
        confidence,
        source: "seed".to_string(),
        last_verified_at: None,
    }
}

pub fn inline_db_rule() -> PatternRule {
    rule("inline-db", r"db\.query", Severity::Critical)
}

pub fn paths(root: &Path) -> StorePaths {
    StorePaths {
        entries_seed: root.join("knowledge_entries.json"),
        dynamic_seed: root.join("dynamic_rules.seed.json"),
        dynamic_rules: root.join("state").join("dynamic_rules.json"),
    }
}

pub fn write_entries_seed(paths: &StorePaths, entries: &[KnowledgeEntry]) {
    fs::write(&paths.entries_seed, serde_json::to_string(entries).unwrap()).unwrap();
}

pub fn memory_store(root: &Path, dynamic_rules: Vec<DynamicRule>) -> KnowledgeStore {
    KnowledgeStore::from_parts(
        vec![inline_db_rule()],
        vec![entry("a", 0.5)],
        dynamic_rules,
        root.join("dynamic_rules.json"),
    )
    .unwrap()
}
