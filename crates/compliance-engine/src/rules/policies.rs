//! Section 3: legal policies
//!
//! The heaviest section (weight 25). Refund and cancellation content checks are
//! conjunctive: they are only evaluated when the policy itself was found, since
//! a missing policy already produced its own warning.

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Requirement, Section, MIN_REFUND_PERIOD_DAYS};
use crate::extraction::{Field, SiteContentExtraction};

pub const POLICY_CHECKS: &[CheckSpec] = &[
    CheckSpec::mandatory(
        "POL-001",
        "Terms & Conditions",
        Field::HasTermsConditions,
        "Publish Terms & Conditions and link them from every page.",
    ),
    CheckSpec::mandatory(
        "POL-002",
        "Privacy Policy",
        Field::HasPrivacyPolicy,
        "Add a clearly visible Privacy Policy link in the footer.",
    ),
    CheckSpec::recommended(
        "POL-003",
        "Refund / Return Policy",
        Field::HasRefundPolicy,
        "It is recommended to have a clear Refund / Return Policy.",
    ),
    CheckSpec {
        rule_id: "POL-004",
        item: "Refund period (at least 14 days)",
        field: Some(Field::RefundPeriodDays),
        requirement: Requirement::MinimumDays(MIN_REFUND_PERIOD_DAYS),
        requires: Some(Field::HasRefundPolicy),
        detail: None,
        recommendation:
            "State the refund period explicitly; consider at least 14 days for EU compliance.",
    },
    CheckSpec::recommended(
        "POL-005",
        "Cancellation Policy",
        Field::HasCancellationPolicy,
        "Publish a Cancellation Policy.",
    ),
    CheckSpec::recommended(
        "POL-006",
        "Payment Policy",
        Field::HasPaymentPolicy,
        "Publish a Payment Policy describing accepted methods, currency and charging moment.",
    ),
    CheckSpec::mandatory(
        "POL-007",
        "Policies accessible from all pages",
        Field::PoliciesAccessibleFromAllPages,
        "Place links to all policies in the footer or main menu so they are reachable from every page.",
    ),
    CheckSpec::recommended(
        "POL-008",
        "Service / sale conditions described",
        Field::PolicyMentionsServiceConditions,
        "Describe the conditions under which goods are sold or services are provided.",
    ),
    CheckSpec::recommended(
        "POL-009",
        "Cancellation terms described",
        Field::PolicyMentionsCancellationTerms,
        "Describe how and until when an order or subscription can be cancelled.",
    )
    .requires(Field::HasCancellationPolicy),
    CheckSpec::recommended(
        "POL-010",
        "Refund terms described",
        Field::PolicyMentionsRefundTerms,
        "Describe refund deadlines, conditions and the refund method.",
    )
    .requires(Field::HasRefundPolicy),
    CheckSpec::recommended(
        "POL-011",
        "User restrictions stated",
        Field::PolicyMentionsUserRestrictions,
        "State any restrictions on who may buy (age, geography, etc.).",
    ),
    CheckSpec::mandatory(
        "POL-012",
        "Company named as contracting party",
        Field::PolicyMentionsCompanyName,
        "Name the legal entity as the contracting party in the policies.",
    ),
    CheckSpec::informational("POL-013", "Site language", Field::SitePrimaryLanguage),
];

/// Check policy presence and content
pub fn check_policies(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::Policies, POLICY_CHECKS, extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::fully_compliant;
    use pretty_assertions::assert_eq;
    use shared_types::CheckStatus;

    fn status_of(items: &[ChecklistItem], rule_id: &str) -> Option<CheckStatus> {
        items.iter().find(|i| i.rule_id == rule_id).map(|i| i.status)
    }

    #[test]
    fn test_missing_refund_policy_skips_refund_content_checks() {
        let extraction = SiteContentExtraction {
            has_refund_policy: false,
            ..fully_compliant()
        };
        let items = check_policies(&extraction);

        assert_eq!(status_of(&items, "POL-003"), Some(CheckStatus::Warning));
        assert_eq!(status_of(&items, "POL-004"), None);
        assert_eq!(status_of(&items, "POL-010"), None);
        assert_eq!(items.len(), POLICY_CHECKS.len() - 2);
    }

    #[test]
    fn test_short_refund_period_warns() {
        let extraction = SiteContentExtraction {
            refund_period_days: Some(7),
            ..fully_compliant()
        };
        let items = check_policies(&extraction);
        let period = items.iter().find(|i| i.rule_id == "POL-004").unwrap();
        assert_eq!(period.status, CheckStatus::Warning);
        assert_eq!(period.found_value, "7 days");
        assert!(period.recommendation.as_deref().unwrap().contains("14 days"));
    }

    #[test]
    fn test_unstated_refund_period_raises_nothing() {
        let extraction = SiteContentExtraction {
            refund_period_days: None,
            ..fully_compliant()
        };
        let items = check_policies(&extraction);
        assert_eq!(status_of(&items, "POL-003"), Some(CheckStatus::Pass));
        assert_eq!(status_of(&items, "POL-004"), None);
        assert!(!items.iter().any(|i| i.status == CheckStatus::Warning));
    }

    #[test]
    fn test_missing_terms_fails() {
        let extraction = SiteContentExtraction {
            has_terms_conditions: false,
            ..fully_compliant()
        };
        let items = check_policies(&extraction);
        assert_eq!(status_of(&items, "POL-001"), Some(CheckStatus::Fail));
        assert_eq!(
            items
                .iter()
                .filter(|i| i.status == CheckStatus::Pass)
                .count(),
            11
        );
    }

    #[test]
    fn test_language_is_informational() {
        let items = check_policies(&fully_compliant());
        let language = items.iter().find(|i| i.rule_id == "POL-013").unwrap();
        assert_eq!(language.status, CheckStatus::Info);
        assert_eq!(language.found_value, "English");
        assert_eq!(language.recommendation, None);

        let items = check_policies(&SiteContentExtraction::default());
        let language = items.iter().find(|i| i.rule_id == "POL-013").unwrap();
        assert_eq!(language.status, CheckStatus::Info);
        assert_eq!(language.found_value, "Not detected");
    }
}
