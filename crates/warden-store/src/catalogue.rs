//! Human-readable pitfall catalogue.

use crate::entry::KnowledgeEntry;

/// Rendered in place of the catalogue when there are no pitfalls.
pub const NO_PITFALLS_RECORDED: &str = "No pitfalls recorded.";

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Render entries as numbered sections separated by a horizontal rule.
/// Entries are rendered in the order given.
pub fn render_pitfall_catalogue(pitfalls: &[KnowledgeEntry]) -> String {
    if pitfalls.is_empty() {
        return NO_PITFALLS_RECORDED.to_string();
    }
    pitfalls
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut section = format!("## {}. {}\n\n", i + 1, entry.title.trim());
            if let Some(layer) = entry.layer {
                section.push_str(&format!("Layer: {layer}\n\n"));
            }
            section.push_str(entry.content.trim_end());
            section
        })
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}
