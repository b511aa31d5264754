//! Pass-condition language for dynamic rules
//!
//! Conditions are parsed once into [`PassCondition`] and then evaluated against
//! the value the oracle returned for the rule:
//!
//! 1. an absent value (`Not found`, empty, `none`, `null`) always fails
//! 2. `not_empty` passes
//! 3. `true` passes for `true` / `yes` / `found` / `present`
//! 4. `contains(text)` passes when `text` occurs in the value (case-insensitive)
//! 5. anything else passes: the value was found, so it is accepted

use shared_types::{CheckStatus, ChecklistItem, DynamicChecklistRule};

use crate::patterns::{is_absent, is_truthy, truncate_chars, CONTAINS_CONDITION, NOT_FOUND};

/// Maximum characters of an extracted value shown in the checklist
pub const MAX_FOUND_VALUE_CHARS: usize = 100;

/// Parsed form of a rule's `pass_condition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassCondition {
    NotEmpty,
    IsTrue,
    /// Lowercased, trimmed needle
    Contains(String),
    /// Unrecognised syntax, accepted whenever a value was found
    Unsupported(String),
}

impl PassCondition {
    pub fn parse(condition: &str) -> Self {
        let trimmed = condition.trim();
        let keyword = trimmed.to_lowercase();

        match keyword.as_str() {
            "not_empty" => return PassCondition::NotEmpty,
            "true" => return PassCondition::IsTrue,
            _ => {}
        }

        if let Some(needle) = CONTAINS_CONDITION.captures(trimmed).and_then(|cap| cap.get(1)) {
            return PassCondition::Contains(needle.as_str().trim().to_lowercase());
        }

        PassCondition::Unsupported(trimmed.to_string())
    }

    /// Decide pass/fail for an extracted value
    pub fn is_met(&self, value: &str) -> bool {
        if is_absent(value) {
            return false;
        }

        match self {
            PassCondition::NotEmpty => true,
            PassCondition::IsTrue => is_truthy(value),
            PassCondition::Contains(needle) => value.to_lowercase().contains(needle.as_str()),
            PassCondition::Unsupported(_) => true,
        }
    }
}

/// Evaluate one dynamic rule. `value` is what the oracle returned for the rule id.
pub fn evaluate_rule(rule: &DynamicChecklistRule, value: Option<&str>) -> ChecklistItem {
    evaluate_rule_with_limit(rule, value, MAX_FOUND_VALUE_CHARS)
}

/// As [`evaluate_rule`], with a custom display limit for the found value
pub fn evaluate_rule_with_limit(
    rule: &DynamicChecklistRule,
    value: Option<&str>,
    max_found_value_chars: usize,
) -> ChecklistItem {
    let value = value.unwrap_or(NOT_FOUND);
    let condition = PassCondition::parse(&rule.pass_condition);

    if let PassCondition::Unsupported(raw) = &condition {
        tracing::debug!(
            "Rule {} uses unsupported pass_condition '{}', accepting any found value",
            rule.rule_id,
            raw
        );
    }

    let status = if condition.is_met(value) {
        CheckStatus::Pass
    } else {
        CheckStatus::from(rule.severity)
    };

    let found_value = if is_absent(value) {
        NOT_FOUND.to_string()
    } else {
        truncate_chars(value.trim(), max_found_value_chars)
    };

    ChecklistItem::new(
        rule.section.as_str(),
        rule.item.as_str(),
        rule.rule_id.as_str(),
        status,
        found_value,
        Some(format!("Requirement: {}", rule.description)),
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing and evaluating never panics on arbitrary input
        #[test]
        fn condition_evaluation_no_panic(condition in "\\PC*", value in "\\PC*") {
            let _ = PassCondition::parse(&condition).is_met(&value);
        }

        /// Property: absent values fail whatever the condition
        #[test]
        fn absent_value_always_fails(condition in "\\PC{0,40}", sentinel in "(not found|Not Found|NOT FOUND|none|None|null|NULL)") {
            prop_assert!(!PassCondition::parse(&condition).is_met(&sentinel));
        }

        /// Property: contains() matches when the needle is embedded in the value
        #[test]
        fn contains_matches_embedded_needle(
            prefix in "[a-z ]{0,20}",
            needle in "[a-z]{1,10}",
            suffix in "[a-z ]{0,20}"
        ) {
            let value = format!("X{}{}{}", prefix, needle.to_uppercase(), suffix);
            let condition = PassCondition::parse(&format!("contains({})", needle));
            prop_assert!(condition.is_met(&value));
        }
    }
}
