//! Descriptions and fix suggestions for generated rules.

use super::pattern::{callable_base, ApiShape};
use crate::model::{ChangeCategory, ChangeRecord, FixSuggestion};

/// The replacement name, if there is a usable one.
pub(crate) fn replacement(change: &ChangeRecord) -> Option<&str> {
    change
        .replacement_api
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
}

fn subject(api: &str) -> String {
    let name = api.trim();
    if name.is_empty() {
        "An unnamed API".to_string()
    } else {
        format!("`{name}`")
    }
}

/// Category-specific description; the change's own description is
/// appended verbatim.
pub fn describe(change: &ChangeRecord) -> String {
    let who = subject(&change.deprecated_api);
    let verb = change.category.verb();
    let mut text = match (change.category, replacement(change)) {
        (ChangeCategory::Renamed, Some(new)) => format!("{who} was {verb} to `{new}`."),
        (ChangeCategory::Removed, Some(new)) => {
            format!("{who} was {verb}; use `{new}` instead.")
        }
        (ChangeCategory::Changed, Some(new)) => {
            format!("{who} {verb} behavior; migrate to `{new}`.")
        }
        (ChangeCategory::Changed, None) => format!("{who} {verb} behavior."),
        (_, None) => format!("{who} was {verb}."),
    };
    if !change.description.is_empty() {
        text.push(' ');
        text.push_str(&change.description);
    }
    text
}

/// Before/after example, or `None` when there is no replacement to show.
pub fn fix_suggestion(change: &ChangeRecord, shape: ApiShape) -> Option<FixSuggestion> {
    let new = replacement(change)?;
    let old = change.deprecated_api.trim();

    let (before, after) = match shape {
        ApiShape::TypeName => (
            format!("let value = {old}()"),
            format!("let value = {new}()"),
        ),
        ApiShape::Callable => (
            format!("{}(...)", callable_base(old)),
            format!("{}(...)", callable_base(new)),
        ),
        ApiShape::Qualified => (format!("let value = {old}"), format!("let value = {new}")),
        ApiShape::Member | ApiShape::Blank => {
            (format!("value.{old}"), format!("value.{new}"))
        }
    };

    let guidance = change
        .migration_guidance
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty());
    let explanation = match guidance {
        Some(g) => format!("Replace `{old}` with `{new}`. {g}"),
        None => format!(
            "Replace `{old}` with `{new}`. Update all references to `{old}` to use `{new}`."
        ),
    };

    Some(FixSuggestion {
        before,
        after,
        explanation,
    })
}
