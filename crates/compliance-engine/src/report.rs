//! Report assembly for both analysis modes
//!
//! Everything here is synchronous and deterministic given the generation
//! timestamp; the facade only adds the extraction call and the clock.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;
use shared_types::{
    ChecklistItem, ComplianceReport, ComplianceStatus, DynamicChecklistRule, ReportStats,
};

use crate::condition::evaluate_rule_with_limit;
use crate::extraction::SiteContentExtraction;
use crate::rules::check_all_sections;
use crate::scoring::{classify_dynamic, classify_static, ratio_score, weighted_score, SectionTally};

/// Company name used when none was found or supplied
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Current UTC time in report format
pub fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `"Checked N items: P passed, F failed, W warnings. Score: S/100. Status: T."`
pub fn summarize(stats: &ReportStats, score: u8, status: ComplianceStatus) -> String {
    format!(
        "Checked {} items: {} passed, {} failed, {} warnings. Score: {}/100. Status: {}.",
        stats.total, stats.passed, stats.failed, stats.warnings, score, status
    )
}

/// Score and classify the fixed checklist for an extraction
pub fn static_report(extraction: &SiteContentExtraction, generated_at: String) -> ComplianceReport {
    let mut tallies = BTreeMap::new();
    let mut checklist: Vec<ChecklistItem> = Vec::new();

    for (section, items) in check_all_sections(extraction) {
        let tally = SectionTally::from_items(&items);
        tracing::debug!(
            "Section '{}': {}/{} passed (weight {})",
            section.label(),
            tally.passed,
            tally.scorable,
            section.weight()
        );
        tallies.insert(section, tally);
        checklist.extend(items);
    }

    let stats = ReportStats::from_checklist(&checklist);
    let score = weighted_score(&tallies);
    let status = classify_static(score, stats.failed);

    ComplianceReport {
        company_name: extraction.company_name_or_unknown(),
        score,
        status,
        summary: summarize(&stats, score, status),
        checklist,
        generated_at,
    }
}

/// The oracle's answer for one rule, rendered as text
///
/// `None` when missing, `null` or `false`: a negative boolean answer means the
/// requested value was not found.
pub fn rule_value(values: &Value, rule_id: &str) -> Option<String> {
    match values.get(rule_id)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        other @ Value::Object(_) => Some(other.to_string()),
    }
}

/// Evaluate caller-supplied rules against the oracle's key -> value answer
pub fn dynamic_report(
    rules: &[DynamicChecklistRule],
    values: &Value,
    company_name: &str,
    max_found_value_chars: usize,
    generated_at: String,
) -> ComplianceReport {
    if rules.is_empty() {
        return empty_rule_set_report(company_name, generated_at);
    }

    let checklist: Vec<ChecklistItem> = rules
        .iter()
        .map(|rule| {
            let value = rule_value(values, &rule.rule_id);
            let item = evaluate_rule_with_limit(rule, value.as_deref(), max_found_value_chars);
            tracing::debug!("Rule {}: {}", rule.rule_id, item.status.as_str());
            item
        })
        .collect();

    let stats = ReportStats::from_checklist(&checklist);
    let score = ratio_score(&checklist);
    let status = classify_dynamic(score);

    ComplianceReport {
        company_name: company_name_or_unknown(company_name),
        score,
        status,
        summary: summarize(&stats, score, status),
        checklist,
        generated_at,
    }
}

/// Fixed report for an empty rule set: score 0, NEEDS_REVIEW, no checklist
pub fn empty_rule_set_report(company_name: &str, generated_at: String) -> ComplianceReport {
    ComplianceReport {
        company_name: company_name_or_unknown(company_name),
        score: 0,
        status: ComplianceStatus::NeedsReview,
        checklist: Vec::new(),
        summary: "No rules provided in the checklist.".to_string(),
        generated_at,
    }
}

fn company_name_or_unknown(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        UNKNOWN_COMPANY.to_string()
    } else {
        name.to_string()
    }
}
