//! Field parsing for CSV rows.
//!
//! Nothing here fails: unparseable input is coerced to a default and
//! reported through [`Coerced`].

use crate::sync::types::Coerced;

/// Text values accepted as `true`, compared after trimming and lowercasing.
pub const TRUE_WORDS: [&str; 5] = ["1", "true", "t", "yes", "y"];

/// Parse boolean-like text. Anything not in [`TRUE_WORDS`] is `false`.
#[must_use]
pub fn parse_bool(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    TRUE_WORDS.contains(&normalized.as_str())
}

/// Render a boolean the way [`parse_bool`] reads it back.
#[must_use]
pub const fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Parse an id column. `None` if absent, blank, negative or not a number.
#[must_use]
pub fn parse_id(text: Option<&str>) -> Option<u64> {
    text.and_then(|t| t.trim().parse::<u64>().ok())
}

/// Parse an age column, defaulting to 0.
#[must_use]
pub fn parse_age(text: Option<&str>) -> Coerced<u32> {
    match text.and_then(|t| t.trim().parse::<u32>().ok()) {
        Some(age) => Coerced::Parsed(age),
        None => Coerced::Defaulted(0),
    }
}

/// Parse a name column; blank names become `Student<placeholder_id>`.
#[must_use]
pub fn parse_name(text: Option<&str>, placeholder_id: u64) -> Coerced<String> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(name) => Coerced::Parsed(name.to_string()),
        None => Coerced::Defaulted(format!("Student{placeholder_id}")),
    }
}

/// Parse a full-time column; absent means `false`.
#[must_use]
pub fn parse_full_time(text: Option<&str>) -> bool {
    text.is_some_and(parse_bool)
}
