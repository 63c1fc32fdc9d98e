//! Respondent - one survey row with its encoded validation answers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{QuestionId, ResponseCode, ResponseId};

/// What to do with answers outside the label set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownAnswerPolicy {
    /// Abort the batch, naming the row and column.
    #[default]
    Reject,
    /// Record the answer as missing; every check using it fails.
    FailCheck,
}

/// One encoded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Coded(ResponseCode),
    /// Sentinel for an answer that could not be encoded.
    Missing,
}

impl Answer {
    pub fn code(&self) -> Option<ResponseCode> {
        match self {
            Answer::Coded(code) => Some(*code),
            Answer::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Answer::Missing)
    }
}

impl From<ResponseCode> for Answer {
    fn from(code: ResponseCode) -> Self {
        Answer::Coded(code)
    }
}

/// A respondent's identity and the answers the validation groups look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Respondent {
    pub id: ResponseId,
    pub condition: Option<String>,
    answers: HashMap<QuestionId, Answer>,
}

impl Respondent {
    pub fn new(id: ResponseId, condition: Option<String>) -> Self {
        Self {
            id,
            condition,
            answers: HashMap::new(),
        }
    }

    /// Builder-style answer insertion.
    pub fn with_answer(mut self, question: QuestionId, answer: impl Into<Answer>) -> Self {
        self.answers.insert(question, answer.into());
        self
    }

    pub fn insert(&mut self, question: QuestionId, answer: Answer) {
        self.answers.insert(question, answer);
    }

    /// The answer to a question. Questions never recorded count as missing.
    pub fn answer(&self, question: &QuestionId) -> Answer {
        self.answers.get(question).copied().unwrap_or(Answer::Missing)
    }

    /// Questions whose answers are missing, sorted for stable reporting.
    pub fn missing_answers(&self) -> Vec<QuestionId> {
        let mut missing: Vec<QuestionId> = self
            .answers
            .iter()
            .filter(|(_, answer)| answer.is_missing())
            .map(|(question, _)| question.clone())
            .collect();
        missing.sort();
        missing
    }
}
