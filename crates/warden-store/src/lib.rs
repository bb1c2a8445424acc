//! # warden-store
//!
//! The knowledge store: fixed rules, reviewed dynamic rules and knowledge
//! entries behind one lock, with atomic persistence of the dynamic set.
//!
//! - `entry` — knowledge entries, layers, version applicability
//! - `persistence` — seed loading, durable file, atomic writes
//! - `catalogue` — pitfall catalogue rendering
//! - `store` — `KnowledgeStore`

pub mod catalogue;
pub mod entry;
pub mod persistence;
pub mod store;

pub use catalogue::{render_pitfall_catalogue, NO_PITFALLS_RECORDED};
pub use entry::{compare_versions, ArchitectureLayer, KnowledgeEntry, VersionRange};
pub use store::{KnowledgeStore, ReviewSummary};
