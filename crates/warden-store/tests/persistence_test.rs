//! Opening the store: seeds, durable file, failure handling.

mod common;

use std::fs;

use common::*;
use warden_core::config::MatcherConfig;
use warden_core::errors::{StoreError, WardenErrorCode};
use warden_rules::{ReviewStatus, Severity};
use warden_store::KnowledgeStore;

fn open(paths: &warden_core::config::StorePaths) -> Result<KnowledgeStore, StoreError> {
    KnowledgeStore::open(paths, vec![inline_db_rule()], &MatcherConfig::default())
}

#[test]
fn test_missing_entry_seed_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    let err = open(&paths).err().unwrap();
    assert!(matches!(err, StoreError::SeedMissing { .. }));
    assert!(err.is_startup_fatal());
}

#[test]
fn test_malformed_entry_seed_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    fs::write(&paths.entries_seed, "[{\"id\": ").unwrap();
    let err = open(&paths).err().unwrap();
    assert!(matches!(err, StoreError::SeedMalformed { .. }));
    assert_eq!(err.error_code(), "SEED_MALFORMED");
}

#[test]
fn test_corrupt_durable_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    write_entries_seed(&paths, &[entry("a", 0.5)]);
    fs::create_dir_all(paths.dynamic_rules.parent().unwrap()).unwrap();
    fs::write(&paths.dynamic_rules, "not json").unwrap();

    let err = open(&paths).err().unwrap();
    assert!(matches!(err, StoreError::DurableCorrupt { .. }));
    assert!(err.is_startup_fatal());
}

#[test]
fn test_no_dynamic_sources_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    write_entries_seed(&paths, &[entry("a", 0.5)]);

    let store = open(&paths).unwrap();
    assert!(store.get_dynamic_violations().is_empty());
    assert_eq!(store.all_entries().len(), 1);
    assert!(!paths.dynamic_rules.exists());
}

#[test]
fn test_dynamic_seed_persisted_on_first_open() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    write_entries_seed(&paths, &[entry("a", 0.5)]);
    let seeded = vec![dynamic("s1", "legacy", Severity::Warning, ReviewStatus::Approved)];
    fs::write(&paths.dynamic_seed, serde_json::to_string(&seeded).unwrap()).unwrap();

    let store = open(&paths).unwrap();
    assert_eq!(store.get_dynamic_violations(), seeded);
    assert!(paths.dynamic_rules.exists());

    // The durable file now wins over the seed.
    store.update_review_status("s1", ReviewStatus::Draft).unwrap();
    drop(store);
    fs::write(&paths.dynamic_seed, "[]").unwrap();
    let reopened = open(&paths).unwrap();
    assert_eq!(
        reopened.get_dynamic_violations()[0].review_status,
        ReviewStatus::Draft
    );
}

#[test]
fn test_reload_round_trips_dynamic_rules() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    write_entries_seed(&paths, &[entry("a", 0.5)]);

    let store = open(&paths).unwrap();
    store
        .upsert_dynamic_violation(dynamic("d1", "x", Severity::Error, ReviewStatus::Draft))
        .unwrap();
    store
        .upsert_dynamic_violation(dynamic("d2", "y", Severity::Warning, ReviewStatus::Approved))
        .unwrap();
    store.update_review_status("d1", ReviewStatus::Reviewed).unwrap();
    let before = store.get_dynamic_violations();
    drop(store);

    let reopened = open(&paths).unwrap();
    assert_eq!(reopened.get_dynamic_violations(), before);
}

#[test]
fn test_persistence_failure_keeps_memory_and_heals() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    write_entries_seed(&paths, &[entry("a", 0.5)]);
    let store = open(&paths).unwrap();

    // A directory in the way makes the final rename fail.
    fs::create_dir_all(&paths.dynamic_rules).unwrap();
    let err = store
        .upsert_dynamic_violation(dynamic("d1", "x", Severity::Error, ReviewStatus::Approved))
        .unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));
    assert_eq!(store.get_dynamic_violations().len(), 1);
    assert_eq!(
        store.detect_violations("x").first().map(|r| r.id.as_str()),
        Some("d1")
    );

    fs::remove_dir(&paths.dynamic_rules).unwrap();
    store
        .upsert_dynamic_violation(dynamic("d2", "y", Severity::Warning, ReviewStatus::Draft))
        .unwrap();
    drop(store);

    let reopened = open(&paths).unwrap();
    let ids: Vec<String> = reopened
        .get_dynamic_violations()
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(ids, vec!["d1", "d2"]);
}

#[test]
fn test_durable_file_is_camel_case_json() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    write_entries_seed(&paths, &[entry("a", 0.5)]);
    let store = open(&paths).unwrap();
    store
        .upsert_dynamic_violation(dynamic("d1", "x", Severity::Error, ReviewStatus::Reviewed))
        .unwrap();

    let raw = fs::read_to_string(&paths.dynamic_rules).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["id"], "d1");
    assert_eq!(first["reviewStatus"], "reviewed");
    assert_eq!(first["correctionId"], "fix-d1");
    assert_eq!(first["sourceRelease"], "1.0");
}
