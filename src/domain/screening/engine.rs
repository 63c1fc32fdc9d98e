//! Screening Engine - binds the validation groups to a response table.
//!
//! # Algorithm
//! 1. Resolve the id, condition and question columns. Any absent column aborts
//!    before a single row is evaluated.
//! 2. Per row: encode the questions the groups read, evaluate every group,
//!    apply the acceptance filter.
//! 3. Emit accepted rows with the diagnostic columns appended.
//!
//! Rows are independent; nothing is shared between respondents or groups.

use std::collections::HashSet;

use super::{
    encode, AcceptanceFilter, Answer, CheckEvaluator, EncodeError, GroupDefinition, Recoder,
    Respondent, RespondentValidation, ResponseTable, ScreeningError, ScreeningParameters,
    ScreeningSummary, Tolerances, UnknownAnswerPolicy, ValidationGroup, DEFAULT_ALLOWED_FAILURES,
};
use crate::domain::foundation::{QuestionId, ResponseId};

/// Number of validation groups in the instrument.
pub const VALIDATION_GROUP_COUNT: usize = 6;

/// Output column holding the number of failed groups.
pub const FAILED_COUNT_COLUMN: &str = "FailedValidationCount";

/// Where the engine finds identity and condition in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub response_id_column: String,
    /// When set, the column must exist.
    pub condition_column: Option<String>,
    /// Condition tag whose accepted count is reported.
    pub monitored_condition: Option<String>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            response_id_column: "ResponseId".to_string(),
            condition_column: Some("gc".to_string()),
            monitored_condition: Some("1".to_string()),
        }
    }
}

/// Everything the engine needs, already validated by its producer.
#[derive(Debug, Clone)]
pub struct ScreeningSettings {
    pub groups: Vec<ValidationGroup>,
    pub tolerances: Tolerances,
    pub allowed_failures: u8,
    pub unknown_answers: UnknownAnswerPolicy,
    pub layout: TableLayout,
    pub recoder: Recoder,
}

impl ScreeningSettings {
    /// Settings with default tolerances, tolerance and layout.
    pub fn with_groups(groups: Vec<ValidationGroup>) -> Self {
        Self {
            groups,
            tolerances: Tolerances::default(),
            allowed_failures: DEFAULT_ALLOWED_FAILURES,
            unknown_answers: UnknownAnswerPolicy::default(),
            layout: TableLayout::default(),
            recoder: Recoder::default(),
        }
    }
}

/// Result of one batch.
#[derive(Debug, Clone)]
pub struct ScreenedTable {
    /// Accepted rows, original columns plus diagnostics.
    pub table: ResponseTable,
    /// One record per input row, accepted or not.
    pub validations: Vec<RespondentValidation>,
    pub summary: ScreeningSummary,
}

/// Column positions resolved once per table.
struct ColumnMap {
    response_id: usize,
    condition: Option<usize>,
    /// Group declaration order, each question once.
    questions: Vec<(QuestionId, usize)>,
}

/// The response validation engine.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    groups: Vec<ValidationGroup>,
    evaluator: CheckEvaluator,
    filter: AcceptanceFilter,
    unknown_answers: UnknownAnswerPolicy,
    layout: TableLayout,
    recoder: Recoder,
}

impl ScreeningEngine {
    /// Builds the engine, enforcing exactly six groups with distinct ids.
    pub fn new(settings: ScreeningSettings) -> Result<Self, ScreeningError> {
        let mut groups = settings.groups;

        if groups.len() != VALIDATION_GROUP_COUNT {
            return Err(ScreeningError::GroupCount {
                expected: VALIDATION_GROUP_COUNT,
                actual: groups.len(),
            });
        }

        let mut seen = HashSet::new();
        for group in &groups {
            if !seen.insert(group.id()) {
                return Err(ScreeningError::DuplicateGroup { group: group.id() });
            }
        }
        groups.sort_by_key(ValidationGroup::id);

        Ok(Self {
            groups,
            evaluator: CheckEvaluator::new(settings.tolerances),
            filter: AcceptanceFilter::new(settings.allowed_failures),
            unknown_answers: settings.unknown_answers,
            layout: settings.layout,
            recoder: settings.recoder,
        })
    }

    pub fn groups(&self) -> &[ValidationGroup] {
        &self.groups
    }

    pub fn evaluator(&self) -> &CheckEvaluator {
        &self.evaluator
    }

    pub fn filter(&self) -> &AcceptanceFilter {
        &self.filter
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// The settings that decide acceptance, for the batch report.
    pub fn parameters(&self) -> ScreeningParameters {
        ScreeningParameters {
            tolerances: *self.evaluator.tolerances(),
            allowed_failures: self.filter.allowed_failures(),
            unknown_answers: self.unknown_answers,
            groups: self.groups.iter().map(GroupDefinition::from).collect(),
        }
    }

    /// Evaluates every group for one respondent.
    pub fn validate_respondent(&self, respondent: &Respondent) -> RespondentValidation {
        let outcomes = self
            .groups
            .iter()
            .map(|group| group.evaluate(respondent, &self.evaluator))
            .collect();
        self.filter.decide(respondent, outcomes)
    }

    /// Screens a whole table.
    pub fn screen(&self, table: &ResponseTable) -> Result<ScreenedTable, ScreeningError> {
        let columns = self.resolve_columns(table)?;

        let validations = table
            .rows()
            .iter()
            .map(|row| {
                let respondent = self.respondent_from_row(row, &columns)?;
                Ok(self.validate_respondent(&respondent))
            })
            .collect::<Result<Vec<_>, ScreeningError>>()?;

        let mut screened = ResponseTable::new(self.output_headers(table.headers()));
        for (row, validation) in table.rows().iter().zip(&validations) {
            if !validation.accepted {
                continue;
            }
            screened.push_annotated(self.annotate_row(row, table.headers(), validation));
        }

        let summary = self
            .filter
            .summarize(&validations, self.layout.monitored_condition.as_deref());

        Ok(ScreenedTable {
            table: screened,
            validations,
            summary,
        })
    }

    fn resolve_columns(&self, table: &ResponseTable) -> Result<ColumnMap, ScreeningError> {
        let locate = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| ScreeningError::missing_column(name))
        };

        let response_id = locate(&self.layout.response_id_column)?;
        let condition = self
            .layout
            .condition_column
            .as_deref()
            .map(locate)
            .transpose()?;

        let mut seen = HashSet::new();
        let mut questions = Vec::new();
        for question in self.groups.iter().flat_map(|g| g.questions()) {
            if seen.insert(question) {
                questions.push((question.clone(), locate(question.as_str())?));
            }
        }

        Ok(ColumnMap {
            response_id,
            condition,
            questions,
        })
    }

    fn respondent_from_row(&self, row: &[String], columns: &ColumnMap) -> Result<Respondent, ScreeningError> {
        let id = ResponseId::new(row[columns.response_id].clone());
        let condition = columns.condition.map(|i| row[i].clone());
        let mut respondent = Respondent::new(id, condition);

        for (question, index) in &columns.questions {
            let answer = match encode(&row[*index]) {
                Ok(code) => Answer::Coded(code),
                Err(EncodeError::UnknownResponseKind { label }) => match self.unknown_answers {
                    UnknownAnswerPolicy::Reject => {
                        return Err(ScreeningError::UnknownResponseKind {
                            response_id: respondent.id.clone(),
                            column: question.clone(),
                            label,
                        })
                    }
                    UnknownAnswerPolicy::FailCheck => Answer::Missing,
                },
            };
            respondent.insert(question.clone(), answer);
        }

        Ok(respondent)
    }

    fn output_headers(&self, input: &[String]) -> Vec<String> {
        let mut headers = input.to_vec();
        for group in &self.groups {
            headers.push(group.pass_column());
            headers.extend(group.distance_columns());
        }
        headers.push(FAILED_COUNT_COLUMN.to_string());
        headers
    }

    fn annotate_row(&self, row: &[String], headers: &[String], validation: &RespondentValidation) -> Vec<String> {
        let mut cells: Vec<String> = row
            .iter()
            .zip(headers)
            .map(|(cell, column)| self.recoder.recode(column, cell).unwrap_or_else(|| cell.clone()))
            .collect();

        for outcome in &validation.outcomes {
            cells.push(render_bool(outcome.passed));
            cells.extend(
                outcome
                    .checks
                    .iter()
                    .map(|check| check.distance().map(|d| d.to_string()).unwrap_or_default()),
            );
        }
        cells.push(validation.failed_validation_count.to_string());
        cells
    }
}

fn render_bool(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}
