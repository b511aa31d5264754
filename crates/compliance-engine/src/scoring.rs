//! Weighted scoring and status classification

use std::collections::BTreeMap;

use shared_types::{CheckStatus, ChecklistItem, ComplianceStatus};

use crate::rules::Section;

/// Minimum score for COMPLIANT in static mode (also requires zero failures)
pub const COMPLIANT_THRESHOLD: u8 = 80;

/// Minimum score for NEEDS_REVIEW in static mode
pub const REVIEW_THRESHOLD: u8 = 50;

/// Passed and scorable item counts for one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionTally {
    pub passed: usize,
    pub scorable: usize,
}

impl SectionTally {
    pub fn from_items(items: &[ChecklistItem]) -> Self {
        let mut tally = Self::default();
        for item in items.iter().filter(|item| item.status.is_scorable()) {
            tally.scorable += 1;
            if item.status == CheckStatus::Pass {
                tally.passed += 1;
            }
        }
        tally
    }

    /// Share of the section earned. A section with nothing to score counts as fully passed.
    pub fn fraction(&self) -> f64 {
        if self.scorable == 0 {
            return 1.0;
        }
        self.passed as f64 / self.scorable as f64
    }
}

/// Round half to even, then clamp into 0..=100
fn to_score(total: f64) -> u8 {
    total.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Unrounded weighted total, exposed for exact arithmetic checks
pub fn weighted_total(tallies: &BTreeMap<Section, SectionTally>) -> f64 {
    Section::ALL
        .iter()
        .map(|section| {
            let tally = tallies.get(section).copied().unwrap_or_default();
            f64::from(section.weight()) * tally.fraction()
        })
        .sum()
}

/// Static score: each section contributes `weight * passed / scorable`
pub fn weighted_score(tallies: &BTreeMap<Section, SectionTally>) -> u8 {
    to_score(weighted_total(tallies))
}

/// Dynamic score: plain pass ratio over scorable items, 0 when there are none
pub fn ratio_score(items: &[ChecklistItem]) -> u8 {
    let tally = SectionTally::from_items(items);
    if tally.scorable == 0 {
        return 0;
    }
    to_score(100.0 * tally.passed as f64 / tally.scorable as f64)
}

/// Three-band classification used for the fixed checklist
pub fn classify_static(score: u8, fail_count: usize) -> ComplianceStatus {
    if score >= COMPLIANT_THRESHOLD && fail_count == 0 {
        ComplianceStatus::Compliant
    } else if score >= REVIEW_THRESHOLD {
        ComplianceStatus::NeedsReview
    } else {
        ComplianceStatus::NonCompliant
    }
}

/// Binary classification used for caller-supplied rule sets
///
/// Stricter than [`classify_static`]: there is no review band, anything short
/// of a perfect score is NON-COMPLIANT.
pub fn classify_dynamic(score: u8) -> ComplianceStatus {
    if score == 100 {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::NonCompliant
    }
}
