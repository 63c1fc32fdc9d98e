//! Acceptance Filter - turns group outcomes into an include/exclude decision.

use serde::{Deserialize, Serialize};

use super::{GroupOutcome, Respondent};
use crate::domain::foundation::{QuestionId, ResponseId};

/// Default number of groups a respondent may fail and still be accepted.
pub const DEFAULT_ALLOWED_FAILURES: u8 = 2;

/// Full validation record for one respondent. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespondentValidation {
    pub response_id: ResponseId,
    pub condition: Option<String>,
    pub outcomes: Vec<GroupOutcome>,
    pub failed_validation_count: u8,
    pub accepted: bool,
    /// Questions whose answers could not be encoded.
    pub missing_answers: Vec<QuestionId>,
}

impl RespondentValidation {
    pub fn passed_groups(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }
}

/// Applies the failure tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceFilter {
    allowed_failures: u8,
}

impl AcceptanceFilter {
    pub fn new(allowed_failures: u8) -> Self {
        Self { allowed_failures }
    }

    pub fn allowed_failures(&self) -> u8 {
        self.allowed_failures
    }

    /// `failed = groups - passed`; accepted iff `failed <= allowed_failures`.
    pub fn decide(&self, respondent: &Respondent, outcomes: Vec<GroupOutcome>) -> RespondentValidation {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let failed_validation_count = (outcomes.len() - passed) as u8;

        RespondentValidation {
            response_id: respondent.id.clone(),
            condition: respondent.condition.clone(),
            outcomes,
            failed_validation_count,
            accepted: failed_validation_count <= self.allowed_failures,
            missing_answers: respondent.missing_answers(),
        }
    }

    /// Counts the batch. The monitored condition count is reporting only.
    pub fn summarize(
        &self,
        validations: &[RespondentValidation],
        monitored_condition: Option<&str>,
    ) -> ScreeningSummary {
        let accepted = validations.iter().filter(|v| v.accepted).count();

        let accepted_in_condition = monitored_condition.map(|tag| {
            validations
                .iter()
                .filter(|v| {
                    v.accepted
                        && v
                            .condition
                            .as_deref()
                            .is_some_and(|cell| condition_matches(cell, tag))
                })
                .count()
        });

        ScreeningSummary {
            total: validations.len(),
            accepted,
            rejected: validations.len() - accepted,
            allowed_failures: self.allowed_failures,
            monitored_condition: monitored_condition.map(str::to_string),
            accepted_in_condition,
        }
    }
}

/// Compares a condition cell with the monitored tag.
///
/// Numeric exports write the tag as `1` or `1.0`; both sides are compared
/// as numbers when they parse, and as trimmed text otherwise.
fn condition_matches(cell: &str, tag: &str) -> bool {
    let (cell, tag) = (cell.trim(), tag.trim());
    match (cell.parse::<f64>(), tag.parse::<f64>()) {
        (Ok(a), Ok(b)) if a.is_finite() && b.is_finite() => a == b,
        _ => cell == tag,
    }
}

impl Default for AcceptanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_FAILURES)
    }
}

/// Batch counts for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub allowed_failures: u8,
    pub monitored_condition: Option<String>,
    pub accepted_in_condition: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::GroupId;
    use proptest::prelude::*;

    fn outcomes(passes: &[bool]) -> Vec<GroupOutcome> {
        passes
            .iter()
            .enumerate()
            .map(|(i, passed)| GroupOutcome {
                group: GroupId::new(i as u8 + 1).unwrap(),
                passed: *passed,
                checks: vec![],
            })
            .collect()
    }

    fn respondent(condition: Option<&str>) -> Respondent {
        Respondent::new(ResponseId::new("R_1"), condition.map(str::to_string))
    }

    #[test]
    fn all_groups_passed_is_accepted() {
        let v = AcceptanceFilter::default().decide(&respondent(None), outcomes(&[true; 6]));
        assert_eq!(v.failed_validation_count, 0);
        assert!(v.accepted);
        assert_eq!(v.passed_groups(), 6);
    }

    #[test]
    fn three_failures_is_rejected() {
        let v = AcceptanceFilter::default().decide(
            &respondent(None),
            outcomes(&[false, true, false, true, false, true]),
        );
        assert_eq!(v.failed_validation_count, 3);
        assert!(!v.accepted);
    }

    #[test]
    fn two_failures_is_accepted_at_default_tolerance() {
        let v = AcceptanceFilter::default().decide(
            &respondent(None),
            outcomes(&[false, false, true, true, true, true]),
        );
        assert_eq!(v.failed_validation_count, 2);
        assert!(v.accepted);
    }

    #[test]
    fn zero_tolerance_rejects_any_failure() {
        let v = AcceptanceFilter::new(0).decide(
            &respondent(None),
            outcomes(&[true, true, true, true, true, false]),
        );
        assert!(!v.accepted);
    }

    #[test]
    fn summary_counts_monitored_condition_among_accepted() {
        let filter = AcceptanceFilter::default();
        let validations = vec![
            filter.decide(&respondent(Some("1")), outcomes(&[true; 6])),
            filter.decide(&respondent(Some("2")), outcomes(&[true; 6])),
            filter.decide(&respondent(Some("1")), outcomes(&[false; 6])),
            filter.decide(&respondent(Some("1")), outcomes(&[true; 6])),
        ];

        let summary = filter.summarize(&validations, Some("1"));
        assert_eq!(summary.total, 4);
        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.accepted_in_condition, Some(2));
    }

    #[test]
    fn monitored_condition_matches_numeric_exports() {
        let filter = AcceptanceFilter::default();
        let validations = vec![
            filter.decide(&respondent(Some("1.0")), outcomes(&[true; 6])),
            filter.decide(&respondent(Some(" 1 ")), outcomes(&[true; 6])),
            filter.decide(&respondent(Some("10")), outcomes(&[true; 6])),
            filter.decide(&respondent(Some("2.0")), outcomes(&[true; 6])),
            filter.decide(&respondent(None), outcomes(&[true; 6])),
        ];

        let summary = filter.summarize(&validations, Some("1"));
        assert_eq!(summary.accepted_in_condition, Some(2));
    }

    #[test]
    fn monitored_condition_falls_back_to_text() {
        let filter = AcceptanceFilter::default();
        let validations = vec![
            filter.decide(&respondent(Some("control")), outcomes(&[true; 6])),
            filter.decide(&respondent(Some("treatment")), outcomes(&[true; 6])),
        ];

        let summary = filter.summarize(&validations, Some("control"));
        assert_eq!(summary.accepted_in_condition, Some(1));
    }

    #[test]
    fn summary_without_monitored_condition() {
        let filter = AcceptanceFilter::default();
        let summary = filter.summarize(&[], None);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.accepted_in_condition, None);
    }

    proptest! {
        #[test]
        fn failed_count_is_bounded_and_decides_acceptance(
            passes in proptest::collection::vec(any::<bool>(), 6),
            allowed in 0u8..=6,
        ) {
            let v = AcceptanceFilter::new(allowed).decide(&respondent(None), outcomes(&passes));
            prop_assert!(v.failed_validation_count <= 6);
            prop_assert_eq!(
                v.failed_validation_count as usize,
                6 - passes.iter().filter(|p| **p).count()
            );
            prop_assert_eq!(v.accepted, v.failed_validation_count <= allowed);
        }
    }
}
