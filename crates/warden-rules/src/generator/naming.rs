//! Rule and correction identifiers for generated rules.

use xxhash_rust::xxh3::xxh3_64;

use crate::model::ChangeCategory;

const ID_PREFIX: &str = "auto-";

/// Stable rule id for a `(deprecated API, release)` pair.
///
/// The readable form is `auto-<api>-v<release>`, with the API lowercased,
/// `(`, `)`, `.` and spaces turned into `-`, and release dots turned into `-`.
/// When that folding loses anything (uppercase letters included), an xxh3
/// digest of the raw pair is appended after a `+`. Readable ids never
/// contain `+`, so they cannot collide with digested ones.
pub fn rule_id(deprecated_api: &str, release: &str) -> String {
    let api_slug: String = deprecated_api
        .chars()
        .map(|c| match c {
            '(' | ')' | '.' | ' ' => '-',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();
    let release_slug = release.replace('.', "-");

    let mut id = format!("{ID_PREFIX}{api_slug}-v{release_slug}");
    if !is_readable_losslessly(deprecated_api, release) {
        let mut raw = Vec::with_capacity(deprecated_api.len() + release.len() + 1);
        raw.extend_from_slice(deprecated_api.as_bytes());
        raw.push(0);
        raw.extend_from_slice(release.as_bytes());
        id.push_str(&format!("+{:016x}", xxh3_64(&raw)));
    }
    id
}

fn is_readable_losslessly(api: &str, release: &str) -> bool {
    api.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && release
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Correction key: `deprecated-<api>-<category>`, with parentheses removed
/// and dots/spaces turned into `-`. Case is preserved.
pub fn correction_id(deprecated_api: &str, category: ChangeCategory) -> String {
    let sanitized: String = deprecated_api
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .map(|c| if matches!(c, '.' | ' ') { '-' } else { c })
        .collect();
    format!("deprecated-{sanitized}-{}", category.verb())
}
