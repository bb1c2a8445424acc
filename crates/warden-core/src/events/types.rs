//! Event payload types for store lifecycle events.

/// Payload for `on_dynamic_rule_upserted`.
#[derive(Debug, Clone)]
pub struct DynamicRuleUpsertedEvent {
    pub rule_id: String,
    pub review_status: String,
    /// False when an existing rule with the same id was replaced.
    pub inserted: bool,
    pub persisted: bool,
}

/// Payload for `on_review_status_changed`.
#[derive(Debug, Clone)]
pub struct ReviewStatusChangedEvent {
    pub rule_id: String,
    pub previous: String,
    pub current: String,
    pub persisted: bool,
}

/// Payload for `on_entries_upserted`.
#[derive(Debug, Clone)]
pub struct EntriesUpsertedEvent {
    pub entry_ids: Vec<String>,
}

/// Payload for `on_violations_detected`.
#[derive(Debug, Clone)]
pub struct ViolationsDetectedEvent {
    pub rule_ids: Vec<String>,
    pub highest_severity: Option<String>,
}
