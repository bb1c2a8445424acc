//! EventDispatcher — synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::WardenEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered, `emit` iterates over an empty Vec.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn WardenEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn WardenEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn WardenEventHandler)>(&self, event_name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!(event = event_name, "event handler panicked");
            }
        }
    }

    pub fn emit_dynamic_rule_upserted(&self, event: &DynamicRuleUpsertedEvent) {
        self.emit("dynamic_rule_upserted", |h| h.on_dynamic_rule_upserted(event));
    }

    pub fn emit_review_status_changed(&self, event: &ReviewStatusChangedEvent) {
        self.emit("review_status_changed", |h| h.on_review_status_changed(event));
    }

    pub fn emit_entries_upserted(&self, event: &EntriesUpsertedEvent) {
        self.emit("entries_upserted", |h| h.on_entries_upserted(event));
    }

    pub fn emit_violations_detected(&self, event: &ViolationsDetectedEvent) {
        self.emit("violations_detected", |h| h.on_violations_detected(event));
    }
}
