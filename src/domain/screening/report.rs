//! Screening report - the audit record written alongside the output table.

use serde::{Deserialize, Serialize};

use super::{
    PolicyKind, RespondentValidation, ScreeningSummary, Tolerances, UnknownAnswerPolicy,
    ValidationGroup,
};
use crate::domain::foundation::{GroupId, QuestionId, Timestamp};

/// A validation group as it was configured for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub id: GroupId,
    pub policy: PolicyKind,
    pub positive: Vec<QuestionId>,
    pub negative: Vec<QuestionId>,
}

impl From<&ValidationGroup> for GroupDefinition {
    fn from(group: &ValidationGroup) -> Self {
        Self {
            id: group.id(),
            policy: group.policy(),
            positive: group.positive().to_vec(),
            negative: group.negative().to_vec(),
        }
    }
}

/// Every setting that decides acceptance, enough to repeat the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningParameters {
    pub tolerances: Tolerances,
    pub allowed_failures: u8,
    pub unknown_answers: UnknownAnswerPolicy,
    pub groups: Vec<GroupDefinition>,
}

/// Why one respondent was excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRespondent {
    pub response_id: String,
    pub failed_validation_count: u8,
    /// Ordinals of the failed groups.
    pub failed_groups: Vec<u8>,
}

impl RejectedRespondent {
    pub fn from_validation(validation: &RespondentValidation) -> Self {
        Self {
            response_id: validation.response_id.to_string(),
            failed_validation_count: validation.failed_validation_count,
            failed_groups: validation
                .outcomes
                .iter()
                .filter(|o| !o.passed)
                .map(|o| o.group.value())
                .collect(),
        }
    }
}

/// Batch-level audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub generated_at: Timestamp,
    pub parameters: ScreeningParameters,
    pub summary: ScreeningSummary,
    pub rejected: Vec<RejectedRespondent>,
}

impl ScreeningReport {
    pub fn new(
        generated_at: Timestamp,
        parameters: ScreeningParameters,
        summary: ScreeningSummary,
        validations: &[RespondentValidation],
    ) -> Self {
        Self {
            generated_at,
            parameters,
            summary,
            rejected: validations
                .iter()
                .filter(|v| !v.accepted)
                .map(RejectedRespondent::from_validation)
                .collect(),
        }
    }
}
