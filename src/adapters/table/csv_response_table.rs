//! CSV Response Table Adapter
//!
//! Reads and writes survey exports as CSV files. Survey platforms put one
//! or more descriptive rows under the header; `skip_rows` discards them.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::Timestamp;
use crate::domain::screening::ResponseTable;
use crate::ports::{ResponseTableReader, ResponseTableWriter, TableError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File name prefix of a screened table written without an explicit path.
const OUTPUT_PREFIX: &str = "validated_survey_";

/// Load-time shaping of a CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvOptions {
    /// Rows after the header to discard before data begins.
    pub skip_rows: usize,
    /// Columns removed at load time; names not present are ignored.
    pub drop_columns: Vec<String>,
}

/// CSV file holding one response table
#[derive(Debug, Clone)]
pub struct CsvResponseTable {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvResponseTable {
    /// Create an adapter for the given file with default options
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: CsvOptions::default(),
        }
    }

    /// Output file in `dir` named after the run time, e.g.
    /// `validated_survey_03-18__01-47-55.csv`.
    pub fn timestamped_path(dir: &Path, at: &Timestamp) -> PathBuf {
        dir.join(format!("{}{}.csv", OUTPUT_PREFIX, at.file_stamp()))
    }

    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, bytes: &[u8]) -> Result<ResponseTable, TableError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(parse_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut table = ResponseTable::new(headers);
        for record in reader.records().skip(self.options.skip_rows) {
            let record = record.map_err(parse_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            table
                .push_row(record.iter().map(str::to_string).collect())
                .map_err(|e| TableError::Parse {
                    line,
                    reason: e.to_string(),
                })?;
        }

        Ok(table.without_columns(&self.options.drop_columns))
    }

    fn render(table: &ResponseTable) -> Result<Vec<u8>, TableError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(table.headers())
            .map_err(|e| TableError::SerializationFailed(e.to_string()))?;
        for row in table.rows() {
            writer
                .write_record(row)
                .map_err(|e| TableError::SerializationFailed(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| TableError::SerializationFailed(e.to_string()))
    }
}

fn parse_error(error: csv::Error) -> TableError {
    let line = error.position().map(|p| p.line()).unwrap_or_default();
    let reason = match error.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("found record with {} fields, expected {}", len, expected_len),
        _ => error.to_string(),
    };
    TableError::Parse { line, reason }
}

#[async_trait]
impl ResponseTableReader for CsvResponseTable {
    async fn load(&self) -> Result<ResponseTable, TableError> {
        if !self.path.exists() {
            return Err(TableError::NotFound(self.path.display().to_string()));
        }

        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| TableError::IoError(e.to_string()))?;

        self.parse(&bytes)
    }
}

#[async_trait]
impl ResponseTableWriter for CsvResponseTable {
    async fn save(&self, table: &ResponseTable) -> Result<(), TableError> {
        let bytes = Self::render(table)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TableError::IoError(e.to_string()))?;
        }

        fs::write(&self.path, bytes)
            .await
            .map_err(|e| TableError::IoError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    async fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).await.unwrap();
        path
    }

    #[test]
    fn test_timestamped_path_uses_run_time() {
        let at = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 18, 1, 47, 55).unwrap());
        let path = CsvResponseTable::timestamped_path(Path::new("out"), &at);
        assert_eq!(path, Path::new("out").join("validated_survey_03-18__01-47-55.csv"));
    }

    #[tokio::test]
    async fn test_csv_load_simple_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "in.csv", "ResponseId,Q1\nR_1,Slightly agree\nR_2,Strongly disagree\n").await;

        let table = CsvResponseTable::new(&path).load().await.unwrap();

        assert_eq!(table.headers(), strings(&["ResponseId", "Q1"]).as_slice());
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "Q1"), Some("Strongly disagree"));
    }

    #[tokio::test]
    async fn test_csv_load_skips_secondary_header_rows() {
        let temp_dir = TempDir::new().unwrap();
        let content = "ResponseId,Q1\nResponse ID,How much do you agree?\n{\"ImportId\":\"_recordId\"},{\"ImportId\":\"QID1\"}\nR_1,Slightly agree\n";
        let path = write_file(&temp_dir, "in.csv", content).await;

        let table = CsvResponseTable::new(&path)
            .with_options(CsvOptions {
                skip_rows: 2,
                drop_columns: vec![],
            })
            .load()
            .await
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "ResponseId"), Some("R_1"));
    }

    #[tokio::test]
    async fn test_csv_load_drops_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "in.csv", "StartDate,ResponseId,Q1\n2024-01-01,R_1,Slightly agree\n").await;

        let table = CsvResponseTable::new(&path)
            .with_options(CsvOptions {
                skip_rows: 0,
                drop_columns: strings(&["StartDate", "NotThere"]),
            })
            .load()
            .await
            .unwrap();

        assert_eq!(table.headers(), strings(&["ResponseId", "Q1"]).as_slice());
        assert_eq!(table.rows()[0], strings(&["R_1", "Slightly agree"]));
    }

    #[tokio::test]
    async fn test_csv_load_strips_byte_order_mark() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "in.csv", "\u{feff}ResponseId,Q1\nR_1,1\n").await;

        let table = CsvResponseTable::new(&path).load().await.unwrap();

        assert_eq!(table.column_index("ResponseId"), Some(0));
    }

    #[tokio::test]
    async fn test_csv_load_ragged_row_names_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "in.csv", "A,B,C\n1,2,3\n4,5\n").await;

        let err = CsvResponseTable::new(&path).load().await.unwrap_err();

        match err {
            TableError::Parse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 3"), "{}", reason);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_csv_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = CsvResponseTable::new(temp_dir.path().join("missing.csv")).load().await;

        assert!(matches!(result, Err(TableError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_csv_save_creates_parent_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("screened.csv");
        let table = ResponseTable::from_rows(
            strings(&["ResponseId", "Comment"]),
            vec![strings(&["R_1", "agrees, mostly"]), strings(&["R_2", ""])],
        )
        .unwrap();

        let adapter = CsvResponseTable::new(&path);
        adapter.save(&table).await.unwrap();
        let loaded = adapter.load().await.unwrap();

        assert_eq!(loaded, table);
    }
}
