//! Group policies - how a validation group turns its questions into checks.
//!
//! A group declares its policy by tag. The tag selects one of three
//! [`GroupPolicy`] implementations, each of which lays out the pairwise
//! checks for the group. The group passes when every planned check passes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CheckKind, GroupShapeError};
use crate::domain::foundation::{GroupId, QuestionId};

/// Declared combination policy of a validation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    SimpleOpposite,
    AsymmetricChain,
    SameOnly,
}

impl PolicyKind {
    /// Resolves the tag to its policy implementation.
    pub fn policy(&self) -> &'static dyn GroupPolicy {
        match self {
            PolicyKind::SimpleOpposite => &SimpleOpposite,
            PolicyKind::AsymmetricChain => &AsymmetricChain,
            PolicyKind::SameOnly => &SameOnly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PolicyKind::SimpleOpposite => "simple_opposite",
            PolicyKind::AsymmetricChain => "asymmetric_chain",
            PolicyKind::SameOnly => "same_only",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One pairwise check a policy asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCheck {
    /// Position within the group, used for diagnostic attribution.
    pub index: usize,
    pub left: QuestionId,
    pub right: QuestionId,
    pub kinds: Vec<CheckKind>,
    /// Which distance is recorded as this check's diagnostic.
    pub reported: CheckKind,
}

impl PlannedCheck {
    fn single(index: usize, left: &QuestionId, right: &QuestionId, kind: CheckKind) -> Self {
        Self {
            index,
            left: left.clone(),
            right: right.clone(),
            kinds: vec![kind],
            reported: kind,
        }
    }
}

/// Combination policy for one validation group.
pub trait GroupPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Verifies the group has the question counts this policy needs.
    fn check_shape(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<(), GroupShapeError>;

    /// Lays out the checks in evaluation order, rejecting a malformed group.
    fn plan(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<Vec<PlannedCheck>, GroupShapeError>;

    /// Output column holding the distance of check `index`.
    fn distance_column(&self, group: GroupId, index: usize) -> String;
}

fn count_mismatch(
    policy: PolicyKind,
    expected: &'static str,
    positive: &[QuestionId],
    negative: &[QuestionId],
) -> GroupShapeError {
    GroupShapeError::QuestionCount {
        policy,
        expected,
        positive: positive.len(),
        negative: negative.len(),
    }
}

/// One positive and one negative question that should cancel out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleOpposite;

impl GroupPolicy for SimpleOpposite {
    fn kind(&self) -> PolicyKind {
        PolicyKind::SimpleOpposite
    }

    fn check_shape(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<(), GroupShapeError> {
        if positive.len() != 1 || negative.len() != 1 {
            return Err(count_mismatch(
                self.kind(),
                "1 positive and 1 negative question",
                positive,
                negative,
            ));
        }
        Ok(())
    }

    fn plan(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<Vec<PlannedCheck>, GroupShapeError> {
        self.check_shape(positive, negative)?;
        Ok(vec![PlannedCheck::single(0, &positive[0], &negative[0], CheckKind::Opposite)])
    }

    fn distance_column(&self, group: GroupId, _index: usize) -> String {
        format!("Validation distance #{}", group)
    }
}

/// Several positive questions that must agree with each other and each
/// oppose the single negative question.
///
/// Check 0 compares the first two positive questions with `same`; checks
/// 1..=n compare each positive question, in declaration order, with the
/// negative question using `opposite`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsymmetricChain;

impl GroupPolicy for AsymmetricChain {
    fn kind(&self) -> PolicyKind {
        PolicyKind::AsymmetricChain
    }

    fn check_shape(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<(), GroupShapeError> {
        if positive.len() < 2 || negative.len() != 1 {
            return Err(count_mismatch(
                self.kind(),
                "at least 2 positive and exactly 1 negative question",
                positive,
                negative,
            ));
        }
        Ok(())
    }

    fn plan(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<Vec<PlannedCheck>, GroupShapeError> {
        self.check_shape(positive, negative)?;

        let mut checks = Vec::with_capacity(positive.len() + 1);
        checks.push(PlannedCheck::single(0, &positive[0], &positive[1], CheckKind::Same));

        for (offset, question) in positive.iter().enumerate() {
            checks.push(PlannedCheck::single(
                offset + 1,
                question,
                &negative[0],
                CheckKind::Opposite,
            ));
        }

        Ok(checks)
    }

    fn distance_column(&self, group: GroupId, index: usize) -> String {
        format!("Positive validation distance #{}-{}", group, index)
    }
}

/// Two positive questions that should match; no negative counterpart.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameOnly;

impl GroupPolicy for SameOnly {
    fn kind(&self) -> PolicyKind {
        PolicyKind::SameOnly
    }

    fn check_shape(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<(), GroupShapeError> {
        if positive.len() != 2 || !negative.is_empty() {
            return Err(count_mismatch(
                self.kind(),
                "2 positive and no negative questions",
                positive,
                negative,
            ));
        }
        Ok(())
    }

    fn plan(&self, positive: &[QuestionId], negative: &[QuestionId]) -> Result<Vec<PlannedCheck>, GroupShapeError> {
        self.check_shape(positive, negative)?;
        Ok(vec![PlannedCheck::single(0, &positive[0], &positive[1], CheckKind::Same)])
    }

    fn distance_column(&self, group: GroupId, _index: usize) -> String {
        format!("Positive validation distance #{}", group)
    }
}
