//! Section 5: the final payment step

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::{Field, SiteContentExtraction};

pub const CHECKOUT_CHECKS: &[CheckSpec] = &[
    CheckSpec::mandatory(
        "CHK-001",
        "Final price before payment",
        Field::ShowsFinalPrice,
        "Show the final total, including taxes and fees, before the customer pays.",
    ),
    CheckSpec::mandatory(
        "CHK-002",
        "Merchant outlet location at checkout",
        Field::ShowsMerchantLocationAtCheckout,
        "Display the Merchant Outlet Location on the final checkout page, before payment details are entered.",
    ),
    CheckSpec::mandatory(
        "CHK-003",
        "Terms agreement checkbox",
        Field::HasTermsAgreementCheckbox,
        "Add an unticked checkbox for accepting the Terms & Conditions and Refund Policy before purchase.",
    ),
    CheckSpec::recommended(
        "CHK-004",
        "Payment methods listed",
        Field::PaymentMethodsMentioned,
        "List the accepted payment methods (e.g. card scheme logos) on the site.",
    ),
];

/// Check checkout-page disclosures
pub fn check_checkout(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::Checkout, CHECKOUT_CHECKS, extraction)
}
