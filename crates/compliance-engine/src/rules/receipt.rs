//! Section 6: electronic receipts
//!
//! A crawl rarely reaches an order confirmation, so the content of the receipt
//! itself is always left to a manual test purchase.

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::{Field, SiteContentExtraction};

pub const RECEIPT_CHECKS: &[CheckSpec] = &[
    CheckSpec::recommended(
        "RCP-001",
        "Electronic receipt evidence",
        Field::HasReceiptInfo,
        "Mention that an electronic receipt or order confirmation is sent after purchase.",
    ),
    CheckSpec::manual_review(
        "RCP-002",
        "Receipt content verification",
        "Manual check required: make a test purchase and confirm the receipt shows merchant name, MOL, amount, currency, date and transaction id.",
    ),
];

pub fn check_receipt_information(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::Receipt, RECEIPT_CHECKS, extraction)
}
