pub mod record;
pub mod types;

pub use record::{new_report_id, ReportRecord, REPORT_ID_PREFIX};
pub use types::{
    CheckStatus, ChecklistItem, ComplianceReport, ComplianceStatus, DynamicChecklist,
    DynamicChecklistRule, ReportStats, RuleSetError, RuleSeverity,
};
