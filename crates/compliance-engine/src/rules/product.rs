//! Section 4: what is sold and for how much

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::{Field, SiteContentExtraction};

pub const PRODUCT_CHECKS: &[CheckSpec] = &[
    CheckSpec::mandatory(
        "PRD-001",
        "Product / service description",
        Field::HasProductDescription,
        "Describe the goods or services offered in enough detail for an informed purchase.",
    ),
    CheckSpec::mandatory(
        "PRD-002",
        "Prices in purchase currency",
        Field::PricesInPurchaseCurrency,
        "Show prices in the currency the customer will be charged in.",
    ),
    CheckSpec::mandatory(
        "PRD-003",
        "All fees disclosed",
        Field::AllFeesDisclosed,
        "Disclose all fees, commissions and additional charges before checkout.",
    ),
    CheckSpec::recommended(
        "PRD-004",
        "Transparent purchase process",
        Field::TransparentPurchaseProcess,
        "Explain the purchase steps so the buyer knows what happens at each stage.",
    ),
];

pub fn check_product_description(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::ProductDescription, PRODUCT_CHECKS, extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::CheckStatus;

    #[test]
    fn test_hidden_fees_fail() {
        let extraction = SiteContentExtraction {
            has_product_description: true,
            prices_in_purchase_currency: true,
            transparent_purchase_process: true,
            ..Default::default()
        };
        let items = check_product_description(&extraction);
        let failed: Vec<_> = items
            .iter()
            .filter(|i| i.status == CheckStatus::Fail)
            .map(|i| i.rule_id.as_str())
            .collect();
        assert_eq!(failed, vec!["PRD-003"]);
    }
}
