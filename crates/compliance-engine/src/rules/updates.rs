//! Section 7: notifying customers of policy changes
//!
//! Nothing on a crawled page proves customers are told about updates, so this
//! section reads no extraction field and carries one fixed notice.

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::SiteContentExtraction;

pub const UPDATE_CHECKS: &[CheckSpec] = &[CheckSpec::manual_review(
    "UPD-001",
    "Policy update notification",
    "Manual check required: customers must be notified by email of changes to policies and terms before they take effect.",
)];

pub fn check_update_notification(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::UpdateNotification, UPDATE_CHECKS, extraction)
}
