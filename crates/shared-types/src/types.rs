use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Result of a single checklist check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    Info,
}

impl CheckStatus {
    /// Informational items carry no score weight
    pub fn is_scorable(&self) -> bool {
        !matches!(self, CheckStatus::Info)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "fail",
            CheckStatus::Warning => "warning",
            CheckStatus::Info => "info",
        }
    }
}

/// Overall verdict of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "NEEDS_REVIEW")]
    NeedsReview,
    #[serde(rename = "NON-COMPLIANT")]
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "COMPLIANT",
            ComplianceStatus::NeedsReview => "NEEDS_REVIEW",
            ComplianceStatus::NonCompliant => "NON-COMPLIANT",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluated check in a compliance report
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistItem {
    pub section: String, // e.g., "1. Company Information"
    pub item: String,
    pub rule_id: String, // e.g., "CMP-001"
    pub status: CheckStatus,
    pub found_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl ChecklistItem {
    /// Build an item. The recommendation is only kept for failed or warned checks.
    pub fn new(
        section: impl Into<String>,
        item: impl Into<String>,
        rule_id: impl Into<String>,
        status: CheckStatus,
        found_value: impl Into<String>,
        recommendation: Option<String>,
    ) -> Self {
        let recommendation = match status {
            CheckStatus::Fail | CheckStatus::Warning => recommendation,
            CheckStatus::Pass | CheckStatus::Info => None,
        };
        Self {
            section: section.into(),
            item: item.into(),
            rule_id: rule_id.into(),
            status,
            found_value: found_value.into(),
            recommendation,
        }
    }
}

/// Counts over a checklist, used for summaries and rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub info: usize,
}

impl ReportStats {
    pub fn from_checklist(checklist: &[ChecklistItem]) -> Self {
        let mut stats = Self {
            total: checklist.len(),
            ..Self::default()
        };
        for item in checklist {
            match item.status {
                CheckStatus::Pass => stats.passed += 1,
                CheckStatus::Fail => stats.failed += 1,
                CheckStatus::Warning => stats.warnings += 1,
                CheckStatus::Info => stats.info += 1,
            }
        }
        stats
    }

    /// Items that take part in score arithmetic
    pub fn scorable(&self) -> usize {
        self.total - self.info
    }
}

/// Final compliance report handed to rendering and storage
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceReport {
    pub company_name: String,
    pub score: u8, // 0..=100
    pub status: ComplianceStatus,
    pub checklist: Vec<ChecklistItem>,
    pub summary: String,
    pub generated_at: String, // UTC, "%Y-%m-%d %H:%M:%S"
}

impl ComplianceReport {
    pub fn stats(&self) -> ReportStats {
        ReportStats::from_checklist(&self.checklist)
    }
}

/// Status assigned to a dynamic rule whose condition is not met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Fail,
    Warning,
}

impl From<RuleSeverity> for CheckStatus {
    fn from(severity: RuleSeverity) -> Self {
        match severity {
            RuleSeverity::Fail => CheckStatus::Fail,
            RuleSeverity::Warning => CheckStatus::Warning,
        }
    }
}

/// A caller-supplied check evaluated through the pass-condition language
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DynamicChecklistRule {
    pub rule_id: String, // e.g., "SEC-01"
    pub section: String,
    pub item: String,
    pub description: String,
    /// Instruction forwarded verbatim to the extraction oracle
    pub extraction_prompt: String,
    /// `not_empty`, `true`, or `contains(<text>)`
    pub pass_condition: String,
    pub severity: RuleSeverity,
}

/// Problems found while validating a dynamic rule set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("Rule at position {0} has an empty rule_id")]
    EmptyRuleId(usize),

    #[error("Duplicate rule_id: {0}")]
    DuplicateRuleId(String),

    #[error("Rule {0} has an empty pass_condition")]
    EmptyPassCondition(String),
}

/// A named set of dynamic rules, usually parsed from an uploaded checklist document
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DynamicChecklist {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<DynamicChecklistRule>,
}

impl DynamicChecklist {
    /// Reject rule sets the engine should never see
    pub fn validate(&self) -> Result<(), RuleSetError> {
        let mut seen = HashSet::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let id = rule.rule_id.trim();
            if id.is_empty() {
                return Err(RuleSetError::EmptyRuleId(index));
            }
            if !seen.insert(id) {
                return Err(RuleSetError::DuplicateRuleId(id.to_string()));
            }
            if rule.pass_condition.trim().is_empty() {
                return Err(RuleSetError::EmptyPassCondition(id.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, condition: &str) -> DynamicChecklistRule {
        DynamicChecklistRule {
            rule_id: id.to_string(),
            section: "Company Info".to_string(),
            item: "Registration number".to_string(),
            description: "Registration number must be published".to_string(),
            extraction_prompt: "Find the company registration number".to_string(),
            pass_condition: condition.to_string(),
            severity: RuleSeverity::Fail,
        }
    }

    #[test]
    fn test_recommendation_dropped_for_pass_and_info() {
        let pass = ChecklistItem::new("S", "I", "R-1", CheckStatus::Pass, "Found", Some("x".into()));
        let info = ChecklistItem::new("S", "I", "R-2", CheckStatus::Info, "en", Some("x".into()));
        let warn = ChecklistItem::new("S", "I", "R-3", CheckStatus::Warning, "Not found", Some("x".into()));

        assert_eq!(pass.recommendation, None);
        assert_eq!(info.recommendation, None);
        assert_eq!(warn.recommendation.as_deref(), Some("x"));
    }

    #[test]
    fn test_status_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap(),
            "\"NON-COMPLIANT\""
        );
        assert_eq!(
            serde_json::to_string(&ComplianceStatus::NeedsReview).unwrap(),
            "\"NEEDS_REVIEW\""
        );
        assert_eq!(serde_json::to_string(&CheckStatus::Warning).unwrap(), "\"warning\"");
    }

    #[test]
    fn test_stats_counts_each_status() {
        let checklist = vec![
            ChecklistItem::new("S", "a", "A", CheckStatus::Pass, "Found", None),
            ChecklistItem::new("S", "b", "B", CheckStatus::Fail, "Not found", None),
            ChecklistItem::new("S", "c", "C", CheckStatus::Warning, "Not found", None),
            ChecklistItem::new("S", "d", "D", CheckStatus::Info, "English", None),
        ];
        let stats = ReportStats::from_checklist(&checklist);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.warnings, 1);
        assert_eq!(stats.info, 1);
        assert_eq!(stats.scorable(), 3);
    }

    #[test]
    fn test_rule_deserializes_severity() {
        let json = r#"{
            "rule_id": "SEC-01",
            "section": "Company Info",
            "item": "Privacy link",
            "description": "Privacy policy must be linked",
            "extraction_prompt": "Find the privacy policy link",
            "pass_condition": "contains(privacy)",
            "severity": "warning"
        }"#;
        let rule: DynamicChecklistRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.severity, RuleSeverity::Warning);

        let bad = json.replace("\"warning\"", "\"critical\"");
        assert!(serde_json::from_str::<DynamicChecklistRule>(&bad).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let checklist = DynamicChecklist {
            name: "Card scheme".to_string(),
            rules: vec![rule("SEC-01", "not_empty"), rule("SEC-01", "true")],
        };
        assert_eq!(
            checklist.validate(),
            Err(RuleSetError::DuplicateRuleId("SEC-01".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let blank_id = DynamicChecklist {
            name: "x".to_string(),
            rules: vec![rule("SEC-01", "not_empty"), rule("  ", "not_empty")],
        };
        assert_eq!(blank_id.validate(), Err(RuleSetError::EmptyRuleId(1)));

        let blank_condition = DynamicChecklist {
            name: "x".to_string(),
            rules: vec![rule("SEC-02", " ")],
        };
        assert_eq!(
            blank_condition.validate(),
            Err(RuleSetError::EmptyPassCondition("SEC-02".to_string()))
        );
    }

    #[test]
    fn test_validate_accepts_empty_and_unique_sets() {
        assert!(DynamicChecklist::default().validate().is_ok());
        let checklist = DynamicChecklist {
            name: "x".to_string(),
            rules: vec![rule("SEC-01", "not_empty"), rule("SEC-02", "true")],
        };
        assert!(checklist.validate().is_ok());
    }
}
