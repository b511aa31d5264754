//! Section 1: who the merchant is and who regulates it

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::{Field, SiteContentExtraction};

pub const COMPANY_CHECKS: &[CheckSpec] = &[
    CheckSpec::mandatory(
        "CMP-001",
        "Legal company name",
        Field::CompanyName,
        "Display the full legal name of the company (e.g. in the footer and in the Terms & Conditions).",
    ),
    CheckSpec::mandatory(
        "CMP-002",
        "Registration number",
        Field::RegistrationNumber,
        "Publish the company registration / incorporation number.",
    ),
    CheckSpec::mandatory(
        "CMP-003",
        "Legal address",
        Field::LegalAddress,
        "Publish the registered legal address of the company.",
    ),
    CheckSpec::recommended(
        "CMP-004",
        "VAT / tax number",
        Field::VatNumber,
        "Display the VAT or tax identification number if the company is registered for VAT.",
    ),
    CheckSpec::mandatory(
        "CMP-005",
        "Merchant outlet location",
        Field::MerchantOutletLocation,
        "State the Merchant Outlet Location (the country where business decisions are made).",
    ),
    CheckSpec::recommended(
        "CMP-006",
        "License information",
        Field::HasLicenseInfo,
        "If the business is licensed, show the license number and the issuing regulator.",
    )
    .showing(Field::LicenseNumber),
    CheckSpec::recommended(
        "CMP-007",
        "Regulator reference",
        Field::RegulatorLink,
        "Name or link the regulatory authority that issued the license.",
    )
    .requires(Field::HasLicenseInfo),
];

/// Check company identity disclosures
pub fn check_company_information(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::CompanyInformation, COMPANY_CHECKS, extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::fully_compliant;
    use shared_types::CheckStatus;

    #[test]
    fn test_missing_identity_fails_and_vat_warns() {
        let extraction = SiteContentExtraction {
            registration_number: None,
            vat_number: None,
            ..fully_compliant()
        };
        let items = check_company_information(&extraction);

        let registration = items.iter().find(|i| i.rule_id == "CMP-002").unwrap();
        assert_eq!(registration.status, CheckStatus::Fail);
        assert_eq!(registration.found_value, "Not found");

        let vat = items.iter().find(|i| i.rule_id == "CMP-004").unwrap();
        assert_eq!(vat.status, CheckStatus::Warning);
        assert!(vat.recommendation.is_some());
    }

    #[test]
    fn test_regulator_check_requires_license_info() {
        let unlicensed = SiteContentExtraction {
            has_license_info: false,
            ..fully_compliant()
        };
        let items = check_company_information(&unlicensed);
        assert_eq!(items.len(), COMPANY_CHECKS.len() - 1);
        assert!(!items.iter().any(|i| i.rule_id == "CMP-007"));

        let licensed_without_regulator = SiteContentExtraction {
            regulator_link: None,
            ..fully_compliant()
        };
        let items = check_company_information(&licensed_without_regulator);
        let regulator = items.iter().find(|i| i.rule_id == "CMP-007").unwrap();
        assert_eq!(regulator.status, CheckStatus::Warning);
    }

    #[test]
    fn test_license_check_shows_license_number() {
        let items = check_company_information(&fully_compliant());
        let license = items.iter().find(|i| i.rule_id == "CMP-006").unwrap();
        assert_eq!(license.status, CheckStatus::Pass);
        assert_eq!(license.found_value, "EMI 115.1.3.17");
    }

    #[test]
    fn test_found_value_shows_extracted_text() {
        let items = check_company_information(&fully_compliant());
        assert_eq!(items[0].found_value, "Example Payments Ltd");
        assert_eq!(items[0].section, "1. Company Information");
    }
}
