//! Validation groups and their per-respondent outcomes.

use serde::Serialize;

use super::{
    CheckEvaluator, CheckKind, CheckResult, PlannedCheck, PolicyKind, Respondent,
    ScreeningError,
};
use crate::domain::foundation::{GroupId, QuestionId};

/// One attention-check construct: its questions and combination policy.
///
/// Construction validates the question counts against the policy and lays
/// out the checks once, so evaluation is a pure function of the answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationGroup {
    id: GroupId,
    positive: Vec<QuestionId>,
    negative: Vec<QuestionId>,
    policy: PolicyKind,
    checks: Vec<PlannedCheck>,
}

impl ValidationGroup {
    pub fn new(
        id: GroupId,
        positive: Vec<QuestionId>,
        negative: Vec<QuestionId>,
        policy: PolicyKind,
    ) -> Result<Self, ScreeningError> {
        let checks = policy
            .policy()
            .plan(&positive, &negative)
            .map_err(|shape| ScreeningError::invalid_group(id, shape))?;

        Ok(Self {
            id,
            positive,
            negative,
            policy,
            checks,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn positive(&self) -> &[QuestionId] {
        &self.positive
    }

    pub fn negative(&self) -> &[QuestionId] {
        &self.negative
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn checks(&self) -> &[PlannedCheck] {
        &self.checks
    }

    /// Every question the group reads, positive first.
    pub fn questions(&self) -> impl Iterator<Item = &QuestionId> {
        self.positive.iter().chain(self.negative.iter())
    }

    /// Output column holding the group's pass flag.
    pub fn pass_column(&self) -> String {
        format!("Validation #{}", self.id)
    }

    /// Output columns holding each check's distance, in check order.
    pub fn distance_columns(&self) -> Vec<String> {
        let policy = self.policy.policy();
        self.checks
            .iter()
            .map(|check| policy.distance_column(self.id, check.index))
            .collect()
    }

    /// Runs every planned check against one respondent.
    ///
    /// A check reading a missing answer fails and records no distances.
    pub fn evaluate(&self, respondent: &Respondent, evaluator: &CheckEvaluator) -> GroupOutcome {
        let checks: Vec<SubCheck> = self
            .checks
            .iter()
            .map(|planned| {
                let left = respondent.answer(&planned.left).code();
                let right = respondent.answer(&planned.right).code();
                let result = left
                    .zip(right)
                    .map(|(a, b)| evaluator.evaluate_all(a, b, &planned.kinds));
                SubCheck {
                    index: planned.index,
                    left: planned.left.clone(),
                    right: planned.right.clone(),
                    reported: planned.reported,
                    result,
                }
            })
            .collect();

        let passed = checks.iter().all(SubCheck::passed);

        GroupOutcome {
            group: self.id,
            passed,
            checks,
        }
    }
}

/// A check as performed on one respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCheck {
    pub index: usize,
    pub left: QuestionId,
    pub right: QuestionId,
    pub reported: CheckKind,
    /// `None` when either answer was missing.
    pub result: Option<CheckResult>,
}

impl SubCheck {
    pub fn passed(&self) -> bool {
        self.result.map(|r| r.passed).unwrap_or(false)
    }

    /// The diagnostic distance for this check, if both answers were present.
    pub fn distance(&self) -> Option<u8> {
        self.result.map(|r| r.distance(self.reported))
    }
}

/// Pass/fail of one group for one respondent, with the checks behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    pub group: GroupId,
    pub passed: bool,
    pub checks: Vec<SubCheck>,
}

impl GroupOutcome {
    /// The first failing check, for audit.
    pub fn first_failure(&self) -> Option<&SubCheck> {
        self.checks.iter().find(|check| !check.passed())
    }
}
