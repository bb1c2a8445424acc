//! KnowledgeStore — single owner of rule and entry state.
//!
//! All mutable state sits behind one `Mutex`; every operation, reads
//! included, runs inside it, so no two mutations interleave and no reader
//! observes a partially applied batch. The fixed rule set is immutable and
//! read without the lock.
//!
//! Dynamic-rule mutations persist the whole set before returning. When the
//! write fails the in-memory change is kept and the error is returned; the
//! next successful write rewrites the full set and heals the file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use warden_core::config::{MatcherConfig, StorePaths};
use warden_core::errors::{StoreError, StoreResult};
use warden_core::events::{
    DynamicRuleUpsertedEvent, EntriesUpsertedEvent, EventDispatcher, ReviewStatusChangedEvent,
    ViolationsDetectedEvent, WardenEventHandler,
};
use warden_rules::{
    ChangeRecord, DynamicRule, PatternRule, ReviewStatus, RuleGenerator, RuleMatcher,
};

use crate::catalogue::render_pitfall_catalogue;
use crate::entry::{ArchitectureLayer, KnowledgeEntry};
use crate::persistence;

/// Counts of dynamic rules per review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub draft: usize,
    pub reviewed: usize,
    pub approved: usize,
}

impl ReviewSummary {
    pub fn total(&self) -> usize {
        self.draft + self.reviewed + self.approved
    }
}

#[derive(Default)]
struct StoreState {
    entries: Vec<KnowledgeEntry>,
    /// Entry id → position in `entries`.
    index: FxHashMap<String, usize>,
    dynamic_rules: Vec<DynamicRule>,
}

impl StoreState {
    fn new(entries: Vec<KnowledgeEntry>, dynamic_rules: Vec<DynamicRule>) -> Self {
        let mut state = Self {
            dynamic_rules,
            ..Self::default()
        };
        for entry in entries {
            state.upsert_entry(entry);
        }
        state
    }

    fn upsert_entry(&mut self, entry: KnowledgeEntry) {
        match self.index.get(&entry.id) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn dynamic_position(&self, id: &str) -> Option<usize> {
        self.dynamic_rules.iter().position(|r| r.id() == id)
    }
}

/// The knowledge store.
pub struct KnowledgeStore {
    fixed_rules: Arc<[PatternRule]>,
    matcher: RuleMatcher,
    generator: RuleGenerator,
    dynamic_rules_path: PathBuf,
    dispatcher: EventDispatcher,
    state: Mutex<StoreState>,
}

impl KnowledgeStore {
    /// Open the store.
    ///
    /// Loads the mandatory entry seed, then the dynamic rules: the durable
    /// file when it exists, else the dynamic seed (persisted to the durable
    /// location straight away), else nothing. Any failure aborts
    /// construction.
    pub fn open(
        paths: &StorePaths,
        fixed_rules: Vec<PatternRule>,
        matcher: &MatcherConfig,
    ) -> StoreResult<Self> {
        let entries = persistence::load_entries_seed(&paths.entries_seed)?;

        let dynamic_rules = match persistence::load_dynamic_rules(&paths.dynamic_rules)? {
            Some(rules) => rules,
            None => match persistence::load_dynamic_seed(&paths.dynamic_seed)? {
                Some(rules) => {
                    persistence::save_dynamic_rules(&paths.dynamic_rules, &rules)?;
                    tracing::info!(
                        count = rules.len(),
                        durable_path = %paths.dynamic_rules.display(),
                        "seeded durable dynamic rules"
                    );
                    rules
                }
                None => Vec::new(),
            },
        };

        let store = Self::build(
            fixed_rules,
            entries,
            dynamic_rules,
            paths.dynamic_rules.clone(),
            RuleMatcher::with_config(matcher),
        );
        {
            let state = store.state();
            tracing::info!(
                fixed = store.fixed_rules.len(),
                entries = state.entries.len(),
                dynamic = state.dynamic_rules.len(),
                "knowledge store opened"
            );
        }
        Ok(store)
    }

    /// Build a store from already-loaded parts; dynamic mutations persist to
    /// `dynamic_rules_path`. Entries are validated.
    pub fn from_parts(
        fixed_rules: Vec<PatternRule>,
        entries: Vec<KnowledgeEntry>,
        dynamic_rules: Vec<DynamicRule>,
        dynamic_rules_path: impl Into<PathBuf>,
    ) -> StoreResult<Self> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self::build(
            fixed_rules,
            entries,
            dynamic_rules,
            dynamic_rules_path.into(),
            RuleMatcher::new(),
        ))
    }

    fn build(
        fixed_rules: Vec<PatternRule>,
        entries: Vec<KnowledgeEntry>,
        dynamic_rules: Vec<DynamicRule>,
        dynamic_rules_path: PathBuf,
        matcher: RuleMatcher,
    ) -> Self {
        for rule in fixed_rules
            .iter()
            .chain(dynamic_rules.iter().map(|r| &r.rule))
        {
            if let Err(e) = rule.validate() {
                tracing::warn!(rule_id = %rule.id, error = %e, "rule will never match");
            }
        }
        Self {
            fixed_rules: fixed_rules.into(),
            matcher,
            generator: RuleGenerator::new(),
            dynamic_rules_path,
            dispatcher: EventDispatcher::new(),
            state: Mutex::new(StoreState::new(entries, dynamic_rules)),
        }
    }

    /// Register an event handler. Done before the store is shared.
    pub fn register_handler(&mut self, handler: Arc<dyn WardenEventHandler>) {
        self.dispatcher.register(handler);
    }

    /// Replace the generator used by `ingest_change`.
    pub fn with_generator(mut self, generator: RuleGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// The state lock. Mutations leave the state consistent before any
    /// fallible step, so a poisoned lock is safe to recover.
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fixed_rules(&self) -> &[PatternRule] {
        &self.fixed_rules
    }

    pub fn dynamic_rules_path(&self) -> &Path {
        &self.dynamic_rules_path
    }

    // ---- Violation detection ----

    /// Rules firing on `code`: fixed rules then approved dynamic rules,
    /// stably ordered by severity, so fixed rules win ties.
    pub fn detect_violations(&self, code: &str) -> Vec<PatternRule> {
        let hits: Vec<PatternRule> = {
            let state = self.state();
            let approved = state
                .dynamic_rules
                .iter()
                .filter(|r| r.is_active())
                .map(|r| &r.rule);
            self.matcher
                .find_matches(code, self.fixed_rules.iter().chain(approved))
                .into_iter()
                .cloned()
                .collect()
        };
        tracing::debug!(rules_matched = hits.len(), "violation detection complete");

        if self.dispatcher.handler_count() > 0 {
            self.dispatcher.emit_violations_detected(&ViolationsDetectedEvent {
                rule_ids: hits.iter().map(|r| r.id.clone()).collect(),
                highest_severity: hits.first().map(|r| r.severity.to_string()),
            });
        }
        hits
    }

    // ---- Entry queries ----

    pub fn entry(&self, id: &str) -> Option<KnowledgeEntry> {
        let state = self.state();
        state.index.get(id).map(|&i| state.entries[i].clone())
    }

    pub fn all_entries(&self) -> Vec<KnowledgeEntry> {
        self.state().entries.clone()
    }

    fn entries_where(&self, keep: impl Fn(&KnowledgeEntry) -> bool) -> Vec<KnowledgeEntry> {
        self.state()
            .entries
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }

    pub fn entries(&self, layer: ArchitectureLayer) -> Vec<KnowledgeEntry> {
        self.entries_where(|e| e.layer == Some(layer))
    }

    /// Recommendations (non-anti-pattern entries), highest confidence first.
    pub fn pitfalls(&self) -> Vec<KnowledgeEntry> {
        let mut pitfalls = self.entries_where(KnowledgeEntry::is_pitfall);
        pitfalls.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        pitfalls
    }

    pub fn anti_pattern_entries(&self) -> Vec<KnowledgeEntry> {
        self.entries_where(|e| e.is_tutorial_pattern)
    }

    pub fn entries_by_source(&self, source: &str) -> Vec<KnowledgeEntry> {
        self.entries_where(|e| e.source == source)
    }

    pub fn entries_applicable_to(&self, version: &str) -> Vec<KnowledgeEntry> {
        self.entries_where(|e| e.applies_to(version))
    }

    /// All pitfalls as one numbered document.
    pub fn pitfall_catalogue_text(&self) -> String {
        render_pitfall_catalogue(&self.pitfalls())
    }

    // ---- Entry mutation ----

    /// Insert or replace an entry by id.
    pub fn upsert(&self, entry: KnowledgeEntry) -> StoreResult<()> {
        self.upsert_all(vec![entry])
    }

    /// Insert or replace a batch of entries by id. The batch is validated
    /// up front and applied under one lock, so readers see all of it or
    /// none of it.
    pub fn upsert_all(&self, entries: Vec<KnowledgeEntry>) -> StoreResult<()> {
        for entry in &entries {
            entry.validate()?;
        }
        let entry_ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        {
            let mut state = self.state();
            for entry in entries {
                state.upsert_entry(entry);
            }
        }
        tracing::debug!(count = entry_ids.len(), "knowledge entries upserted");
        self.dispatcher
            .emit_entries_upserted(&EntriesUpsertedEvent { entry_ids });
        Ok(())
    }

    // ---- Dynamic rules ----

    /// Replace a dynamic rule by id, or append it, then persist the set.
    pub fn upsert_dynamic_violation(&self, rule: DynamicRule) -> StoreResult<()> {
        if let Err(e) = rule.rule.validate() {
            tracing::warn!(rule_id = %rule.id(), error = %e, "storing rule that will never match");
        }
        let rule_id = rule.id().to_string();
        let review_status = rule.review_status;

        let (inserted, result) = {
            let mut state = self.state();
            let inserted = match state.dynamic_position(&rule_id) {
                Some(i) => {
                    state.dynamic_rules[i] = rule;
                    false
                }
                None => {
                    state.dynamic_rules.push(rule);
                    true
                }
            };
            let result =
                persistence::save_dynamic_rules(&self.dynamic_rules_path, &state.dynamic_rules);
            (inserted, result)
        };

        match &result {
            Ok(()) => tracing::info!(rule_id = %rule_id, inserted, "dynamic rule stored"),
            Err(e) => tracing::error!(rule_id = %rule_id, error = %e, "dynamic rule not persisted"),
        }
        self.dispatcher
            .emit_dynamic_rule_upserted(&DynamicRuleUpsertedEvent {
                rule_id,
                review_status: review_status.to_string(),
                inserted,
                persisted: result.is_ok(),
            });
        result
    }

    /// Set a dynamic rule's review status and persist. Unknown ids are
    /// reported as `RuleNotFound` and change nothing.
    pub fn update_review_status(&self, id: &str, status: ReviewStatus) -> StoreResult<()> {
        let (previous, result) = {
            let mut state = self.state();
            let Some(i) = state.dynamic_position(id) else {
                return Err(StoreError::RuleNotFound { id: id.to_string() });
            };
            let previous = state.dynamic_rules[i].review_status;
            state.dynamic_rules[i].review_status = status;
            let result =
                persistence::save_dynamic_rules(&self.dynamic_rules_path, &state.dynamic_rules);
            (previous, result)
        };

        match &result {
            Ok(()) => tracing::info!(
                rule_id = id,
                from = %previous,
                review_status = %status,
                "review status updated"
            ),
            Err(e) => tracing::error!(rule_id = id, error = %e, "review status not persisted"),
        }
        self.dispatcher
            .emit_review_status_changed(&ReviewStatusChangedEvent {
                rule_id: id.to_string(),
                previous: previous.to_string(),
                current: status.to_string(),
                persisted: result.is_ok(),
            });
        result
    }

    /// Every dynamic rule regardless of status, in stored order.
    pub fn get_dynamic_violations(&self) -> Vec<DynamicRule> {
        self.state().dynamic_rules.clone()
    }

    pub fn dynamic_violations_with_status(&self, status: ReviewStatus) -> Vec<DynamicRule> {
        self.state()
            .dynamic_rules
            .iter()
            .filter(|r| r.review_status == status)
            .cloned()
            .collect()
    }

    pub fn review_summary(&self) -> ReviewSummary {
        let state = self.state();
        let mut summary = ReviewSummary::default();
        for rule in &state.dynamic_rules {
            match rule.review_status {
                ReviewStatus::Draft => summary.draft += 1,
                ReviewStatus::Reviewed => summary.reviewed += 1,
                ReviewStatus::Approved => summary.approved += 1,
            }
        }
        summary
    }

    /// Ids of dynamic rules whose pattern does not compile.
    pub fn invalid_dynamic_rules(&self) -> Vec<String> {
        self.state()
            .dynamic_rules
            .iter()
            .filter(|r| r.rule.validate().is_err())
            .map(|r| r.id().to_string())
            .collect()
    }

    // ---- Ingestion ----

    /// Generate a draft from `change` and store it. Re-ingesting the same
    /// change and release overwrites the stored rule, status included.
    pub fn ingest_change(&self, change: &ChangeRecord, release: &str) -> StoreResult<DynamicRule> {
        let rule = self.generator.generate(change, release);
        self.upsert_dynamic_violation(rule.clone())?;
        Ok(rule)
    }

    /// Ingest records in order, stopping at the first persistence failure.
    pub fn ingest_changes(
        &self,
        changes: &[ChangeRecord],
        release: &str,
    ) -> StoreResult<Vec<DynamicRule>> {
        changes
            .iter()
            .map(|change| self.ingest_change(change, release))
            .collect()
    }

    /// Decode a caller-supplied JSON change record and ingest it.
    pub fn ingest_change_json(&self, json: &str, release: &str) -> StoreResult<DynamicRule> {
        let change = ChangeRecord::from_json(json)?;
        self.ingest_change(&change, release)
    }
}
