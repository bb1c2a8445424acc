//! Pattern derivation from deprecated API names.

/// Matches nothing: used when there is no name to look for.
pub const NEVER_MATCHES: &str = r"[^\s\S]";

/// Characters escaped before an API name is embedded in a pattern.
const REGEX_META: &[char] = &[
    '.', '+', '*', '?', '^', '$', '(', ')', '[', ']', '{', '}', '|', '\\', '/',
];

/// How a deprecated API name is shaped, in derivation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiShape {
    /// Contains `(`: a function or method call.
    Callable,
    /// Contains `.`: a qualified or dotted reference.
    Qualified,
    /// Starts with an uppercase letter.
    TypeName,
    /// Lowercase identifier: property or method.
    Member,
    /// Nothing to match on.
    Blank,
}

impl ApiShape {
    pub fn classify(api: &str) -> Self {
        let name = api.trim();
        if name.is_empty() {
            Self::Blank
        } else if name.contains('(') {
            if callable_base(name).is_empty() {
                Self::Blank
            } else {
                Self::Callable
            }
        } else if name.contains('.') {
            Self::Qualified
        } else if name.chars().next().is_some_and(char::is_uppercase) {
            Self::TypeName
        } else {
            Self::Member
        }
    }
}

/// The part of a callable name before its first `(`.
pub fn callable_base(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => name[..idx].trim(),
        None => name.trim(),
    }
}

/// Backslash-escape every regex metacharacter in `name`.
pub fn escape_regex(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    for c in name.chars() {
        if REGEX_META.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Derive the match pattern for a deprecated API name.
pub fn derive_pattern(api: &str) -> String {
    let name = api.trim();
    match ApiShape::classify(name) {
        ApiShape::Callable => format!(r"{}\s*\(", escape_regex(callable_base(name))),
        ApiShape::Qualified => escape_regex(name),
        ApiShape::TypeName => format!(r"\b{}\b", escape_regex(name)),
        ApiShape::Member => {
            let escaped = escape_regex(name);
            format!(r"\.{escaped}\b|\b{escaped}\s*\(")
        }
        ApiShape::Blank => NEVER_MATCHES.to_string(),
    }
}
