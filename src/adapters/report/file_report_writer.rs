//! File-based Report Writer Adapter
//!
//! Stores the screening report as a YAML file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::screening::ScreeningReport;
use crate::ports::{ReportError, ReportWriter};

/// Writes one YAML report to a fixed path
#[derive(Debug, Clone)]
pub struct FileReportWriter {
    path: PathBuf,
}

impl FileReportWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReportWriter for FileReportWriter {
    async fn write(&self, report: &ScreeningReport) -> Result<(), ReportError> {
        let yaml = serde_yaml::to_string(report)
            .map_err(|e| ReportError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ReportError::IoError(e.to_string()))?;
        }

        fs::write(&self.path, yaml)
            .await
            .map_err(|e| ReportError::IoError(e.to_string()))
    }
}
