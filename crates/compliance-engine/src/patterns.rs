//! Sentinel values and regex patterns shared by the evaluators

use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder shown when a field carries no evidence
pub const NOT_FOUND: &str = "Not found";

/// Oracle answers that mean "nothing was found" (compared lowercase, trimmed)
pub const ABSENT_SENTINELS: &[&str] = &["", "not found", "none", "null"];

/// Answers accepted by the `true` pass condition (compared lowercase, trimmed)
pub const TRUTHY_VALUES: &[&str] = &["true", "yes", "found", "present"];

lazy_static! {
    /// `contains(<needle>)`, keyword case-insensitive
    pub static ref CONTAINS_CONDITION: Regex =
        Regex::new(r"(?is)^\s*contains\s*\((.*)\)\s*$").unwrap();

    /// Markdown code fence wrapped around a model response
    pub static ref CODE_FENCE: Regex =
        Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*\s*\n?(.*?)\s*```\s*$").unwrap();
}

/// True when an extracted value carries no evidence
pub fn is_absent(value: &str) -> bool {
    let value_lower = value.trim().to_lowercase();
    ABSENT_SENTINELS.contains(&value_lower.as_str())
}

/// True when an extracted value affirms presence
pub fn is_truthy(value: &str) -> bool {
    let value_lower = value.trim().to_lowercase();
    TRUTHY_VALUES.contains(&value_lower.as_str())
}

/// Longest prefix of at most `max_chars` characters (not bytes)
pub fn clip_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Owned [`clip_chars`]
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    clip_chars(value, max_chars).to_string()
}

/// Remove a surrounding Markdown code fence, if any
pub fn strip_code_fence(raw: &str) -> &str {
    match CODE_FENCE.captures(raw).and_then(|cap| cap.get(1)) {
        Some(body) => body.as_str(),
        None => raw.trim(),
    }
}
