//! Static compliance checklist
//!
//! Eight sections, each described by a declarative table of [`CheckSpec`]s and
//! evaluated by a pure `check_*` function. Sections are traversed in the order
//! of [`Section::ALL`], which is also the order of the report checklist.

pub mod checkout;
pub mod company;
pub mod contacts;
pub mod mobile;
pub mod policies;
pub mod product;
pub mod receipt;
pub mod updates;

use serde::{Deserialize, Serialize};
use shared_types::{CheckStatus, ChecklistItem};

use crate::extraction::{Field, FieldValue, SiteContentExtraction};

/// Minimum refund window accepted without a warning (EU withdrawal period)
pub const MIN_REFUND_PERIOD_DAYS: u32 = 14;

/// The eight fixed compliance sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    CompanyInformation,
    Contacts,
    Policies,
    ProductDescription,
    Checkout,
    Receipt,
    UpdateNotification,
    Mobile,
}

impl Section {
    /// Traversal order
    pub const ALL: [Section; 8] = [
        Section::CompanyInformation,
        Section::Contacts,
        Section::Policies,
        Section::ProductDescription,
        Section::Checkout,
        Section::Receipt,
        Section::UpdateNotification,
        Section::Mobile,
    ];

    /// Label used in checklist items
    pub fn label(&self) -> &'static str {
        match self {
            Section::CompanyInformation => "1. Company Information",
            Section::Contacts => "2. Contacts",
            Section::Policies => "3. Policies",
            Section::ProductDescription => "4. Product/Service Description",
            Section::Checkout => "5. Checkout",
            Section::Receipt => "6. Receipt Information",
            Section::UpdateNotification => "7. Update Notification Requirements",
            Section::Mobile => "8. Mobile Compliance",
        }
    }

    /// Share of the 100-point score. Weights sum to 100.
    pub fn weight(&self) -> u32 {
        match self {
            Section::CompanyInformation => 15,
            Section::Contacts => 10,
            Section::Policies => 25,
            Section::ProductDescription => 15,
            Section::Checkout => 15,
            Section::Receipt => 10,
            Section::UpdateNotification => 5,
            Section::Mobile => 5,
        }
    }

    /// Rule table for this section
    pub fn checks(&self) -> &'static [CheckSpec] {
        match self {
            Section::CompanyInformation => company::COMPANY_CHECKS,
            Section::Contacts => contacts::CONTACT_CHECKS,
            Section::Policies => policies::POLICY_CHECKS,
            Section::ProductDescription => product::PRODUCT_CHECKS,
            Section::Checkout => checkout::CHECKOUT_CHECKS,
            Section::Receipt => receipt::RECEIPT_CHECKS,
            Section::UpdateNotification => updates::UPDATE_CHECKS,
            Section::Mobile => mobile::MOBILE_CHECKS,
        }
    }

    /// Run this section's evaluator
    pub fn evaluate(&self, extraction: &SiteContentExtraction) -> Vec<ChecklistItem> {
        match self {
            Section::CompanyInformation => company::check_company_information(extraction),
            Section::Contacts => contacts::check_contacts(extraction),
            Section::Policies => policies::check_policies(extraction),
            Section::ProductDescription => product::check_product_description(extraction),
            Section::Checkout => checkout::check_checkout(extraction),
            Section::Receipt => receipt::check_receipt_information(extraction),
            Section::UpdateNotification => updates::check_update_notification(extraction),
            Section::Mobile => mobile::check_mobile_compliance(extraction),
        }
    }
}

/// How a missing or insufficient value is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Missing => fail
    Mandatory,
    /// Missing => warning
    Recommended,
    /// Day count below the minimum => warning; no stated count skips the check
    MinimumDays(u32),
    /// Always info, shows the detected value
    Informational,
    /// Always info with a fixed note; reads no field
    ManualReview(&'static str),
}

/// One row of a section's rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSpec {
    pub rule_id: &'static str,
    pub item: &'static str,
    pub field: Option<Field>,
    pub requirement: Requirement,
    /// Only evaluated when this field is present
    pub requires: Option<Field>,
    /// Shown instead of the checked value on a pass, when present
    pub detail: Option<Field>,
    pub recommendation: &'static str,
}

impl CheckSpec {
    pub const fn mandatory(
        rule_id: &'static str,
        item: &'static str,
        field: Field,
        recommendation: &'static str,
    ) -> Self {
        Self {
            rule_id,
            item,
            field: Some(field),
            requirement: Requirement::Mandatory,
            requires: None,
            detail: None,
            recommendation,
        }
    }

    pub const fn recommended(
        rule_id: &'static str,
        item: &'static str,
        field: Field,
        recommendation: &'static str,
    ) -> Self {
        Self {
            rule_id,
            item,
            field: Some(field),
            requirement: Requirement::Recommended,
            requires: None,
            detail: None,
            recommendation,
        }
    }

    pub const fn informational(rule_id: &'static str, item: &'static str, field: Field) -> Self {
        Self {
            rule_id,
            item,
            field: Some(field),
            requirement: Requirement::Informational,
            requires: None,
            detail: None,
            recommendation: "",
        }
    }

    pub const fn manual_review(rule_id: &'static str, item: &'static str, note: &'static str) -> Self {
        Self {
            rule_id,
            item,
            field: None,
            requirement: Requirement::ManualReview(note),
            requires: None,
            detail: None,
            recommendation: "",
        }
    }

    /// Make this check conjunctive on `prerequisite`
    pub const fn requires(self, prerequisite: Field) -> Self {
        Self {
            requires: Some(prerequisite),
            ..self
        }
    }

    /// On a pass, show `field` as the found value when it was extracted
    pub const fn showing(self, field: Field) -> Self {
        Self {
            detail: Some(field),
            ..self
        }
    }

    /// Evaluate against an extraction. `None` when the prerequisite is absent,
    /// or for a minimum-days check when no period was stated.
    pub fn evaluate(
        &self,
        section: Section,
        extraction: &SiteContentExtraction,
    ) -> Option<ChecklistItem> {
        if let Some(prerequisite) = self.requires {
            if !extraction.value(prerequisite).is_present() {
                return None;
            }
        }

        let value = self.field.map(|field| extraction.value(field));
        let (status, found_value) = match (self.requirement, value) {
            (Requirement::ManualReview(note), _) => (CheckStatus::Info, note.to_string()),
            (_, None) => (CheckStatus::Info, String::new()),
            (Requirement::Informational, Some(value)) => {
                let shown = if value.is_present() {
                    value.display()
                } else {
                    "Not detected".to_string()
                };
                (CheckStatus::Info, shown)
            }
            (Requirement::Mandatory, Some(value)) => (
                presence_status(&value, CheckStatus::Fail),
                value.display(),
            ),
            (Requirement::Recommended, Some(value)) => (
                presence_status(&value, CheckStatus::Warning),
                value.display(),
            ),
            (Requirement::MinimumDays(minimum), Some(value)) => match value {
                FieldValue::Days(Some(days)) if days >= minimum => {
                    (CheckStatus::Pass, value.display())
                }
                FieldValue::Days(Some(_)) => (CheckStatus::Warning, value.display()),
                _ => return None,
            },
        };

        let found_value = match self.detail.map(|field| extraction.value(field)) {
            Some(detail) if status == CheckStatus::Pass && detail.is_present() => detail.display(),
            _ => found_value,
        };

        Some(ChecklistItem::new(
            section.label(),
            self.item,
            self.rule_id,
            status,
            found_value,
            Some(self.recommendation.to_string()),
        ))
    }
}

fn presence_status(value: &FieldValue<'_>, missing: CheckStatus) -> CheckStatus {
    if value.is_present() {
        CheckStatus::Pass
    } else {
        missing
    }
}

/// Evaluate a rule table in order, skipping conjunctive checks whose prerequisite is absent
pub fn evaluate_checks(
    section: Section,
    checks: &[CheckSpec],
    extraction: &SiteContentExtraction,
) -> Vec<ChecklistItem> {
    checks
        .iter()
        .filter_map(|check| check.evaluate(section, extraction))
        .collect()
}

/// Run every section evaluator in traversal order
pub fn check_all_sections(extraction: &SiteContentExtraction) -> Vec<(Section, Vec<ChecklistItem>)> {
    Section::ALL
        .iter()
        .map(|section| (*section, section.evaluate(extraction)))
        .collect()
}

/// Every static rule with its section, for auditing the rule set
pub fn all_checks() -> impl Iterator<Item = (Section, &'static CheckSpec)> {
    Section::ALL
        .into_iter()
        .flat_map(|section| section.checks().iter().map(move |check| (section, check)))
}
