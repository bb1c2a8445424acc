//! Rule generator: pattern derivation, severity, text, identifiers.

use chrono::{TimeZone, Utc};
use warden_rules::generator::{generate_rule, RuleGenerator};
use warden_rules::matcher::match_rules;
use warden_rules::model::{ChangeCategory, ChangeRecord, ReviewStatus, Severity};

fn approved_match(change: &ChangeRecord, code: &str) -> bool {
    let rule = generate_rule(change, "1.0.0").to_pattern_rule();
    !match_rules(code, &[rule]).is_empty()
}

#[test]
fn test_renamed_type_scenario() {
    let change = ChangeRecord::new("OldType", ChangeCategory::Renamed).with_replacement("NewType");
    let rule = generate_rule(&change, "2.0.0");

    assert_eq!(rule.rule.severity, Severity::Warning);
    assert!(rule.rule.id.starts_with("auto-oldtype-v2-0-0"));
    assert_eq!(rule.rule.pattern, r"\bOldType\b");
    assert!(rule.rule.fix_suggestion.is_some());
    assert_eq!(rule.review_status, ReviewStatus::Draft);
    assert_eq!(rule.source, "auto-generated-from-change");
    assert_eq!(rule.source_release, "2.0.0");
}

#[test]
fn test_case_only_differences_get_distinct_ids() {
    let renamed = generate_rule(&ChangeRecord::new("OldType", ChangeCategory::Renamed), "2.0.0");
    let removed = generate_rule(&ChangeRecord::new("oldType", ChangeCategory::Removed), "2.0.0");
    assert_ne!(renamed.rule.id, removed.rule.id);
}

#[test]
fn test_removed_without_replacement_scenario() {
    let change = ChangeRecord::new("Removed", ChangeCategory::Removed);
    let rule = generate_rule(&change, "2.0.0");
    assert_eq!(rule.rule.severity, Severity::Error);
    assert!(rule.rule.fix_suggestion.is_none());
    assert_eq!(rule.rule.correction_id, "deprecated-Removed-removed");
}

#[test]
fn test_changed_is_warning() {
    let rule = generate_rule(&ChangeRecord::new("x", ChangeCategory::Changed), "1");
    assert_eq!(rule.rule.severity, Severity::Warning);
}

#[test]
fn test_type_pattern_respects_word_boundaries() {
    let change = ChangeRecord::new("OldType", ChangeCategory::Renamed);
    assert!(approved_match(&change, "let v = OldType()"));
    assert!(!approved_match(&change, "let v = OldTypeFactory()"));
}

#[test]
fn test_callable_pattern_allows_whitespace_before_paren() {
    let change = ChangeRecord::new("legacyFetch(url:)", ChangeCategory::Removed);
    assert!(approved_match(&change, "legacyFetch (url: u)"));
    assert!(!approved_match(&change, "let f = legacyFetch"));
}

#[test]
fn test_dotted_name_is_literal() {
    let change = ChangeRecord::new("UIApplication.shared", ChangeCategory::Changed);
    assert!(approved_match(&change, "UIApplication.shared.open(url)"));
    // The dot must not act as a wildcard.
    assert!(!approved_match(&change, "UIApplicationXshared"));
}

#[test]
fn test_member_pattern_matches_access_and_call() {
    let change = ChangeRecord::new("isEnabled", ChangeCategory::Renamed);
    assert!(approved_match(&change, "if view.isEnabled {"));
    assert!(approved_match(&change, "isEnabled()"));
    assert!(!approved_match(&change, "let isEnabledFlag = true"));
}

#[test]
fn test_punctuation_cannot_corrupt_pattern() {
    let change = ChangeRecord::new("operator+", ChangeCategory::Changed);
    let rule = generate_rule(&change, "1.0");
    assert!(rule.rule.validate().is_ok());
    assert!(approved_match(&change, "a.operator+(b)"));
    assert!(!approved_match(&change, "a.operatorrr b"));
}

#[test]
fn test_description_embeds_everything() {
    let change = ChangeRecord::new("OldType", ChangeCategory::Renamed)
        .with_replacement("NewType")
        .with_description("Renamed for clarity.");
    let rule = generate_rule(&change, "2.0");
    let d = &rule.rule.description;
    assert!(d.contains("OldType"));
    assert!(d.contains("renamed"));
    assert!(d.contains("NewType"));
    assert!(d.ends_with("Renamed for clarity."));
}

#[test]
fn test_type_fix_suggestion_is_instantiation() {
    let change = ChangeRecord::new("OldType", ChangeCategory::Renamed)
        .with_replacement("NewType")
        .with_guidance("Initializers are unchanged.");
    let fix = generate_rule(&change, "2.0").rule.fix_suggestion.unwrap();
    assert_eq!(fix.before, "let value = OldType()");
    assert_eq!(fix.after, "let value = NewType()");
    assert!(fix.explanation.ends_with("Initializers are unchanged."));
}

#[test]
fn test_empty_and_whitespace_inputs_are_well_formed() {
    for api in ["", "   ", "\t\n"] {
        let change = ChangeRecord::new(api, ChangeCategory::Removed);
        let rule = generate_rule(&change, "");
        assert!(rule.rule.validate().is_ok());
        assert!(!rule.rule.description.is_empty());
        assert!(rule.rule.id.starts_with("auto-"));
        assert!(match_rules("anything\n", &[rule.to_pattern_rule()]).is_empty());
    }
}

#[test]
fn test_non_ascii_names() {
    let change = ChangeRecord::new("Größe.öffnen()", ChangeCategory::Renamed)
        .with_replacement("Größe.open()");
    let rule = generate_rule(&change, "3.1");
    assert!(rule.rule.validate().is_ok());
    assert!(approved_match(&change, "x.Größe.öffnen ()"));
}

#[test]
fn test_generation_is_deterministic_apart_from_timestamp() {
    let change = ChangeRecord::new("foo.bar()", ChangeCategory::Changed)
        .with_replacement("foo.baz()")
        .with_description("Semantics changed.");
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let generator = RuleGenerator::new();
    assert_eq!(
        generator.generate_at(&change, "4.2", at),
        generator.generate_at(&change, "4.2", at)
    );
    let a = generator.generate(&change, "4.2");
    let b = generator.generate(&change, "4.2");
    assert_eq!(a.rule, b.rule);
}

#[test]
fn test_ids_differ_by_release_and_api() {
    let v1 = generate_rule(&ChangeRecord::new("Foo", ChangeCategory::Removed), "1.0");
    let v2 = generate_rule(&ChangeRecord::new("Foo", ChangeCategory::Removed), "2.0");
    let other = generate_rule(&ChangeRecord::new("Bar", ChangeCategory::Removed), "1.0");
    assert_ne!(v1.rule.id, v2.rule.id);
    assert_ne!(v1.rule.id, other.rule.id);
}

#[test]
fn test_custom_source_and_batch() {
    let generator = RuleGenerator::new().with_source("changelog-feed");
    let rules = generator.generate_all(
        &[
            ChangeRecord::new("A", ChangeCategory::Removed),
            ChangeRecord::new("b", ChangeCategory::Renamed),
        ],
        "5.0",
    );
    assert_eq!(rules.len(), 2);
    assert!(rules.iter().all(|r| r.source == "changelog-feed"));
    assert_eq!(rules[0].generated_at, rules[1].generated_at);
}

#[test]
fn test_change_record_json_decoding() {
    let change = ChangeRecord::from_json(
        r#"{"deprecatedAPI":"OldType","replacementAPI":"NewType","description":"d","category":"renamed"}"#,
    )
    .unwrap();
    assert_eq!(change.deprecated_api, "OldType");
    assert_eq!(change.replacement_api.as_deref(), Some("NewType"));
    assert_eq!(change.category, ChangeCategory::Renamed);
    assert!(change.migration_guidance.is_none());

    let err = ChangeRecord::from_json(r#"{"deprecatedAPI":"x","category":"exploded"}"#);
    assert!(err.is_err());
}
