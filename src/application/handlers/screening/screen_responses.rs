//! ScreenResponsesHandler - Command handler for screening one survey batch.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::foundation::Timestamp;
use crate::domain::screening::{
    RespondentValidation, ScreeningEngine, ScreeningError, ScreeningReport, ScreeningSummary,
};
use crate::ports::{ResponseTableReader, ResponseTableWriter, TableError};

/// Errors from a screening run.
#[derive(Debug, thiserror::Error)]
pub enum ScreenResponsesError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Screening(#[from] ScreeningError),
}

/// Command to screen the reader's table into the writer.
#[derive(Debug, Clone)]
pub struct ScreenResponsesCommand {
    /// When false the batch is evaluated but nothing is saved.
    pub write_output: bool,
}

impl Default for ScreenResponsesCommand {
    fn default() -> Self {
        Self { write_output: true }
    }
}

/// Result of a screening run.
#[derive(Debug, Clone)]
pub struct ScreenResponsesResult {
    pub summary: ScreeningSummary,
    pub report: ScreeningReport,
    pub validations: Vec<RespondentValidation>,
    /// Rows saved; zero on a dry run.
    pub written_rows: usize,
}

/// Handler for screening survey batches.
pub struct ScreenResponsesHandler {
    reader: Arc<dyn ResponseTableReader>,
    writer: Arc<dyn ResponseTableWriter>,
    engine: Arc<ScreeningEngine>,
}

impl ScreenResponsesHandler {
    pub fn new(
        reader: Arc<dyn ResponseTableReader>,
        writer: Arc<dyn ResponseTableWriter>,
        engine: Arc<ScreeningEngine>,
    ) -> Self {
        Self {
            reader,
            writer,
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: ScreenResponsesCommand,
    ) -> Result<ScreenResponsesResult, ScreenResponsesError> {
        // 1. Load the batch
        let table = self.reader.load().await?;
        info!(
            rows = table.len(),
            groups = self.engine.groups().len(),
            allowed_failures = self.engine.filter().allowed_failures(),
            "Screening survey batch"
        );

        // 2. Evaluate; a missing column aborts before anything is written
        let screened = self.engine.screen(&table)?;

        for validation in &screened.validations {
            if !validation.missing_answers.is_empty() {
                warn!(
                    response_id = %validation.response_id,
                    missing = validation.missing_answers.len(),
                    "Unrecognised answers treated as missing"
                );
            }
            if !validation.accepted {
                debug!(
                    response_id = %validation.response_id,
                    failed_validation_count = validation.failed_validation_count,
                    "Respondent rejected"
                );
            }
        }

        // 3. Persist accepted rows
        let written_rows = if cmd.write_output {
            self.writer.save(&screened.table).await?;
            screened.table.len()
        } else {
            0
        };

        let summary = screened.summary;
        info!(
            total = summary.total,
            accepted = summary.accepted,
            rejected = summary.rejected,
            monitored_condition = ?summary.monitored_condition,
            accepted_in_condition = ?summary.accepted_in_condition,
            "Screening complete"
        );

        let report = ScreeningReport::new(
            Timestamp::now(),
            self.engine.parameters(),
            summary.clone(),
            &screened.validations,
        );

        Ok(ScreenResponsesResult {
            summary,
            report,
            validations: screened.validations,
            written_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryResponseTable;
    use crate::domain::foundation::{GroupId, QuestionId};
    use crate::domain::screening::{
        PolicyKind, ResponseTable, ScreeningSettings, UnknownAnswerPolicy, ValidationGroup,
        FAILED_COUNT_COLUMN,
    };

    fn ids(names: &[&str]) -> Vec<QuestionId> {
        names.iter().map(|n| QuestionId::new(*n).unwrap()).collect()
    }

    fn group(id: u8, positive: &[&str], negative: &[&str], policy: PolicyKind) -> ValidationGroup {
        ValidationGroup::new(GroupId::new(id).unwrap(), ids(positive), ids(negative), policy).unwrap()
    }

    fn settings() -> ScreeningSettings {
        ScreeningSettings::with_groups(vec![
            group(1, &["P1"], &["N1"], PolicyKind::SimpleOpposite),
            group(2, &["P2"], &["N2"], PolicyKind::SimpleOpposite),
            group(3, &["P3"], &["N3"], PolicyKind::SimpleOpposite),
            group(4, &["P4"], &["N4"], PolicyKind::SimpleOpposite),
            group(5, &["P5a", "P5b"], &["N5"], PolicyKind::AsymmetricChain),
            group(6, &["P6a", "P6b"], &[], PolicyKind::SameOnly),
        ])
    }

    const HEADERS: [&str; 15] = [
        "ResponseId", "gc", "P1", "N1", "P2", "N2", "P3", "N3", "P4", "N4", "P5a", "P5b", "N5",
        "P6a", "P6b",
    ];

    fn row(id: &str, gc: &str, answers: [&str; 13]) -> Vec<String> {
        [id, gc].iter().chain(answers.iter()).map(|c| c.to_string()).collect()
    }

    fn attentive(id: &str) -> Vec<String> {
        row(id, "1", ["3", "-3", "2", "-2", "1", "-1", "0", "0", "2", "3", "-2", "1", "1"])
    }

    fn careless(id: &str) -> Vec<String> {
        row(id, "1", ["3", "3", "3", "3", "3", "3", "3", "3", "3", "3", "3", "3", "3"])
    }

    fn table(rows: Vec<Vec<String>>) -> ResponseTable {
        ResponseTable::from_rows(HEADERS.iter().map(|h| h.to_string()).collect(), rows).unwrap()
    }

    fn handler(
        source: ResponseTable,
        settings: ScreeningSettings,
    ) -> (ScreenResponsesHandler, InMemoryResponseTable) {
        let reader = InMemoryResponseTable::with_table(source);
        let writer = InMemoryResponseTable::new();
        let engine = ScreeningEngine::new(settings).unwrap();
        let handler = ScreenResponsesHandler::new(
            Arc::new(reader),
            Arc::new(writer.clone()),
            Arc::new(engine),
        );
        (handler, writer)
    }

    #[tokio::test]
    async fn test_screen_writes_accepted_rows() {
        let (handler, writer) = handler(
            table(vec![attentive("R_1"), careless("R_2"), attentive("R_3")]),
            settings(),
        );

        let result = handler.handle(ScreenResponsesCommand::default()).await.unwrap();

        assert_eq!(result.summary.total, 3);
        assert_eq!(result.summary.accepted, 2);
        assert_eq!(result.summary.accepted_in_condition, Some(2));
        assert_eq!(result.written_rows, 2);
        assert_eq!(result.report.rejected.len(), 1);
        assert_eq!(result.report.rejected[0].response_id, "R_2");
        assert_eq!(result.report.parameters.groups.len(), 6);
        assert_eq!(result.report.parameters.unknown_answers, UnknownAnswerPolicy::Reject);

        let saved = writer.last_saved().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.cell(0, FAILED_COUNT_COLUMN), Some("0"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let (handler, writer) = handler(table(vec![attentive("R_1")]), settings());

        let result = handler
            .handle(ScreenResponsesCommand { write_output: false })
            .await
            .unwrap();

        assert_eq!(result.summary.accepted, 1);
        assert_eq!(result.written_rows, 0);
        assert_eq!(writer.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_column_aborts_without_output() {
        let source = ResponseTable::from_rows(
            vec!["ResponseId".to_string(), "gc".to_string()],
            vec![vec!["R_1".to_string(), "1".to_string()]],
        )
        .unwrap();
        let (handler, writer) = handler(source, settings());

        let err = handler.handle(ScreenResponsesCommand::default()).await.unwrap_err();

        assert!(matches!(
            err,
            ScreenResponsesError::Screening(ScreeningError::MissingColumn { .. })
        ));
        assert_eq!(writer.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_answer_rejects_batch_by_default() {
        let mut bad = attentive("R_9");
        bad[2] = "Sort of agree".to_string();
        let (handler, writer) = handler(table(vec![attentive("R_1"), bad]), settings());

        let err = handler.handle(ScreenResponsesCommand::default()).await.unwrap_err();

        match err {
            ScreenResponsesError::Screening(ScreeningError::UnknownResponseKind {
                response_id,
                column,
                label,
            }) => {
                assert_eq!(response_id.as_str(), "R_9");
                assert_eq!(column.as_str(), "P1");
                assert_eq!(label, "Sort of agree");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(writer.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_answer_fails_group_under_fail_check() {
        let mut bad = attentive("R_9");
        bad[2] = "Sort of agree".to_string();
        let mut settings = settings();
        settings.unknown_answers = UnknownAnswerPolicy::FailCheck;
        let (handler, _writer) = handler(table(vec![bad]), settings);

        let result = handler.handle(ScreenResponsesCommand::default()).await.unwrap();

        let validation = &result.validations[0];
        assert_eq!(validation.failed_validation_count, 1);
        assert!(validation.accepted);
        assert_eq!(validation.missing_answers.len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_table_error() {
        let engine = ScreeningEngine::new(settings()).unwrap();
        let handler = ScreenResponsesHandler::new(
            Arc::new(InMemoryResponseTable::new()),
            Arc::new(InMemoryResponseTable::new()),
            Arc::new(engine),
        );

        let err = handler.handle(ScreenResponsesCommand::default()).await.unwrap_err();

        assert!(matches!(err, ScreenResponsesError::Table(TableError::NotFound(_))));
    }
}
