//! Report Writer Port - Interface for persisting the screening report.

use async_trait::async_trait;

use crate::domain::screening::ScreeningReport;

/// Errors that can occur while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting a batch's audit record
#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn write(&self, report: &ScreeningReport) -> Result<(), ReportError>;
}
