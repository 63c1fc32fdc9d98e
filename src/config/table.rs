//! Table layout configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::CsvOptions;
use crate::domain::screening::TableLayout;

/// Where identity and condition live in the export, and how to shape it
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Column with the respondent id
    #[serde(default = "default_response_id_column")]
    pub response_id_column: String,

    /// Column with the experimental condition tag
    #[serde(default = "default_condition_column")]
    pub condition_column: Option<String>,

    /// Condition whose accepted count is reported
    #[serde(default = "default_monitored_condition")]
    pub monitored_condition: Option<String>,

    /// Descriptive rows under the header to discard
    #[serde(default)]
    pub skip_rows: usize,

    /// Columns removed at load time
    #[serde(default)]
    pub drop_columns: Vec<String>,
}

impl TableConfig {
    pub fn layout(&self) -> TableLayout {
        TableLayout {
            response_id_column: self.response_id_column.clone(),
            condition_column: self.condition_column.clone(),
            monitored_condition: self.monitored_condition.clone(),
        }
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            skip_rows: self.skip_rows,
            drop_columns: self.drop_columns.clone(),
        }
    }

    /// Validate table configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.response_id_column.trim().is_empty() {
            return Err(ValidationError::MissingRequired("table.response_id_column"));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            response_id_column: default_response_id_column(),
            condition_column: default_condition_column(),
            monitored_condition: default_monitored_condition(),
            skip_rows: 0,
            drop_columns: Vec::new(),
        }
    }
}

fn default_response_id_column() -> String {
    "ResponseId".to_string()
}

fn default_condition_column() -> Option<String> {
    Some("gc".to_string())
}

fn default_monitored_condition() -> Option<String> {
    Some("1".to_string())
}
