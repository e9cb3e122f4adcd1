//! Identifier sanitizing and human-readable titles.

use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Turn an arbitrary table name into a valid cube identifier.
///
/// Lowercases, replaces anything outside `[a-z0-9_]` with `_`, prefixes
/// `col_` when the result does not start with a letter, collapses runs of
/// underscores and trims them from both ends. The result always matches
/// `^[a-z][a-z0-9_]*$`.
pub fn sanitize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut sanitized = INVALID_CHARS.replace_all(&lowered, "_").into_owned();

    if !sanitized.starts_with(|c: char| c.is_ascii_lowercase()) {
        sanitized = format!("col_{}", sanitized);
    }

    let collapsed = UNDERSCORE_RUNS.replace_all(&sanitized, "_");
    collapsed.trim_matches('_').to_string()
}

/// `order_date` -> `Order Date`
pub fn title(name: &str) -> String {
    name.to_title_case()
}
