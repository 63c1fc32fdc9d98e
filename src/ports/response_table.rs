//! Response Table Port - Interface for loading and saving survey tables.
//!
//! The screening engine works on an in-memory [`ResponseTable`]; this port
//! is the boundary where the table comes from and goes to.

use async_trait::async_trait;

use crate::domain::screening::ResponseTable;

/// Errors that can occur while reading or writing a response table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table not found: {0}")]
    NotFound(String),

    #[error("Failed to parse table at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Failed to serialize table: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading the respondent table
#[async_trait]
pub trait ResponseTableReader: Send + Sync {
    /// Load the full table.
    ///
    /// # Errors
    /// Returns `TableError::NotFound` if the source does not exist and
    /// `TableError::Parse` if it is not a rectangular table.
    async fn load(&self) -> Result<ResponseTable, TableError>;
}

/// Port for saving the screened table
#[async_trait]
pub trait ResponseTableWriter: Send + Sync {
    /// Save the table, replacing any previous content.
    async fn save(&self, table: &ResponseTable) -> Result<(), TableError>;
}
