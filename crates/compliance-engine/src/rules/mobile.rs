//! Section 8: mobile presentation

use shared_types::ChecklistItem;

use super::{evaluate_checks, CheckSpec, Section};
use crate::extraction::{Field, SiteContentExtraction};

pub const MOBILE_CHECKS: &[CheckSpec] = &[CheckSpec::recommended(
    "MOB-001",
    "Mobile-responsive layout",
    Field::HasMobileResponsive,
    "Make sure policies, prices and checkout disclosures are equally visible on mobile devices.",
)];

pub fn check_mobile_compliance(extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
    evaluate_checks(Section::Mobile, MOBILE_CHECKS, extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::CheckStatus;

    #[test]
    fn test_responsive_site_passes() {
        let extraction = SiteContentExtraction {
            has_mobile_responsive: true,
            ..Default::default()
        };
        let items = check_mobile_compliance(&extraction);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, CheckStatus::Pass);
        assert_eq!(items[0].section, "8. Mobile Compliance");
        assert_eq!(items[0].recommendation, None);
    }

    #[test]
    fn test_non_responsive_site_warns() {
        let items = check_mobile_compliance(&SiteContentExtraction::default());
        assert_eq!(items[0].rule_id, "MOB-001");
        assert_eq!(items[0].status, CheckStatus::Warning);
        assert!(items[0].recommendation.is_some());
    }
}
