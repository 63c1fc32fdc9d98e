//! Screening error types.

use thiserror::Error;

use super::PolicyKind;
use crate::domain::foundation::{GroupId, QuestionId, ResponseId};

/// Raised by the pure encoder when an answer is outside the label set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Unknown response kind: '{label}'")]
    UnknownResponseKind { label: String },
}

/// A group's questions do not fit its declared policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupShapeError {
    #[error("{policy} needs {expected}, got {positive} positive and {negative} negative questions")]
    QuestionCount {
        policy: PolicyKind,
        expected: &'static str,
        positive: usize,
        negative: usize,
    },
}

/// Errors that abort a screening batch.
///
/// Every variant is raised before any output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreeningError {
    #[error("Required column missing: {column}")]
    MissingColumn { column: String },

    #[error("Unknown response kind '{label}' in column {column} for response {response_id}")]
    UnknownResponseKind {
        response_id: ResponseId,
        column: QuestionId,
        label: String,
    },

    #[error("Validation group #{group} is invalid: {shape}")]
    InvalidGroup {
        group: GroupId,
        #[source]
        shape: GroupShapeError,
    },

    #[error("Expected {expected} validation groups, got {actual}")]
    GroupCount { expected: usize, actual: usize },

    #[error("Validation group #{group} is defined more than once")]
    DuplicateGroup { group: GroupId },
}

impl ScreeningError {
    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        ScreeningError::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates an invalid group error.
    pub fn invalid_group(group: GroupId, shape: GroupShapeError) -> Self {
        ScreeningError::InvalidGroup { group, shape }
    }
}
