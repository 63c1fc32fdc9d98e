//! ResponseTable - the in-memory survey table the engine reads and writes.

use crate::domain::foundation::ValidationError;

/// Rectangular table of text cells with named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResponseTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a table, rejecting rows whose width differs from the header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ValidationError> {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), ValidationError> {
        if row.len() != self.headers.len() {
            return Err(ValidationError::invalid_format(
                "row",
                format!(
                    "row {} has {} cells, expected {}",
                    self.rows.len() + 1,
                    row.len(),
                    self.headers.len()
                ),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends a row already built to the header width.
    pub(crate) fn push_annotated(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell text by row and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|cells| cells[index].as_str())
    }

    /// Removes the named columns; names not present are ignored.
    pub fn without_columns(self, columns: &[String]) -> Self {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !columns.contains(h))
            .map(|(i, _)| i)
            .collect();

        if keep.len() == self.headers.len() {
            return self;
        }

        let project = |cells: &[String]| -> Vec<String> {
            keep.iter().map(|&i| cells[i].clone()).collect()
        };

        Self {
            headers: project(&self.headers),
            rows: self.rows.iter().map(|row| project(row)).collect(),
        }
    }
}
