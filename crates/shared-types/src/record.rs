//! Storage shape for finished compliance reports

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ChecklistItem, ComplianceReport, ComplianceStatus};

/// Prefix of every persisted report id
pub const REPORT_ID_PREFIX: &str = "rpt_";

/// A report as handed to the persistence collaborator
///
/// Report fields are kept flat under their report names so a storage backend can
/// map them to columns without knowing about [`ComplianceReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_id: String,
    /// Caller-supplied correlation id (e.g. the merchant id in the portal)
    pub client_id: String,
    pub site_url: String,
    pub company_name: String,
    pub score: u8,
    pub status: ComplianceStatus,
    pub checklist: Vec<ChecklistItem>,
    pub summary: String,
    pub generated_at: String,
    pub created_at: String,
}

impl ReportRecord {
    /// Wrap a report with a fresh `rpt_` id
    pub fn new(report: ComplianceReport, client_id: &str, site_url: &str) -> Self {
        Self {
            report_id: new_report_id(),
            client_id: client_id.to_string(),
            site_url: site_url.to_string(),
            company_name: report.company_name,
            score: report.score,
            status: report.status,
            checklist: report.checklist,
            summary: report.summary,
            generated_at: report.generated_at,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Rebuild the report this record was created from
    pub fn report(&self) -> ComplianceReport {
        ComplianceReport {
            company_name: self.company_name.clone(),
            score: self.score,
            status: self.status,
            checklist: self.checklist.clone(),
            summary: self.summary.clone(),
            generated_at: self.generated_at.clone(),
        }
    }

    /// Path the direct download route serves this report from
    pub fn download_path(&self) -> String {
        format!("/api/v1/compliance/reports/{}/download", self.report_id)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize report record: {}", e))
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to deserialize report record: {}", e))
    }
}

/// `rpt_` followed by the first 12 hex digits of a v4 UUID
pub fn new_report_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", REPORT_ID_PREFIX, &hex[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckStatus;

    fn sample_report() -> ComplianceReport {
        ComplianceReport {
            company_name: "Example Corp".to_string(),
            score: 98,
            status: ComplianceStatus::NeedsReview,
            checklist: vec![ChecklistItem::new(
                "3. Policies",
                "Terms & Conditions",
                "POL-001",
                CheckStatus::Fail,
                "Not found",
                Some("Publish Terms & Conditions".to_string()),
            )],
            summary: "Checked 1 items: 0 passed, 1 failed, 0 warnings. Score: 98/100. Status: NEEDS_REVIEW."
                .to_string(),
            generated_at: "2026-01-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_report_id_shape() {
        let id = new_report_id();
        assert!(id.starts_with(REPORT_ID_PREFIX));
        assert_eq!(id.len(), REPORT_ID_PREFIX.len() + 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_report_id());
    }

    #[test]
    fn test_record_preserves_report() {
        let report = sample_report();
        let record = ReportRecord::new(report.clone(), "merchant-42", "https://shop.example");

        assert_eq!(record.client_id, "merchant-42");
        assert_eq!(record.report(), report);
        assert!(record.download_path().ends_with(&format!("{}/download", record.report_id)));
    }

    #[test]
    fn test_record_json_uses_report_field_names() {
        let record = ReportRecord::new(sample_report(), "merchant-42", "https://shop.example");
        let json = record.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "NEEDS_REVIEW");
        assert_eq!(value["score"], 98);
        assert_eq!(value["checklist"][0]["rule_id"], "POL-001");

        let restored = ReportRecord::from_json(&json).unwrap();
        assert_eq!(restored, record);
    }
}
