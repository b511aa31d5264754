//! Section 2: how a customer reaches the merchant

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::{Field, SiteContentExtraction};

pub const CONTACT_CHECKS: &[CheckSpec] = &[
    CheckSpec::mandatory(
        "CNT-001",
        "Support email",
        Field::SupportEmail,
        "Provide a customer support email address.",
    ),
    CheckSpec::recommended(
        "CNT-002",
        "Phone number",
        Field::PhoneNumber,
        "Provide a customer support phone number.",
    ),
    CheckSpec::recommended(
        "CNT-003",
        "Physical address",
        Field::PhysicalAddress,
        "Publish a physical or mailing address for customer correspondence.",
    ),
    CheckSpec::mandatory(
        "CNT-004",
        "Contact page",
        Field::HasContactPage,
        "Add a dedicated Contact Us page reachable from every page.",
    ),
];

pub fn check_contacts(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::Contacts, CONTACT_CHECKS, extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::CheckStatus;

    #[test]
    fn test_contact_tiers() {
        let extraction = SiteContentExtraction {
            support_email: Some("help@shop.example".to_string()),
            ..Default::default()
        };
        let statuses: Vec<_> = check_contacts(&extraction)
            .into_iter()
            .map(|i| (i.rule_id, i.status))
            .collect();

        assert_eq!(
            statuses,
            vec![
                ("CNT-001".to_string(), CheckStatus::Pass),
                ("CNT-002".to_string(), CheckStatus::Warning),
                ("CNT-003".to_string(), CheckStatus::Warning),
                ("CNT-004".to_string(), CheckStatus::Fail),
            ]
        );
    }
}
