//! WardenEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling store events.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required because the store is shared across request threads.
pub trait WardenEventHandler: Send + Sync {
    fn on_dynamic_rule_upserted(&self, _event: &DynamicRuleUpsertedEvent) {}
    fn on_review_status_changed(&self, _event: &ReviewStatusChangedEvent) {}
    fn on_entries_upserted(&self, _event: &EntriesUpsertedEvent) {}
    fn on_violations_detected(&self, _event: &ViolationsDetectedEvent) {}
}
