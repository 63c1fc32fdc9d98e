//! In-Memory Response Table Adapter
//!
//! Holds the input table and every saved table in memory.
//! Useful for testing and for embedding the screener.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::screening::ResponseTable;
use crate::ports::{ResponseTableReader, ResponseTableWriter, TableError};

/// In-memory source and sink for response tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryResponseTable {
    source: Arc<RwLock<Option<ResponseTable>>>,
    saved: Arc<RwLock<Vec<ResponseTable>>>,
}

impl InMemoryResponseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter whose `load` returns this table
    pub fn with_table(table: ResponseTable) -> Self {
        Self {
            source: Arc::new(RwLock::new(Some(table))),
            saved: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// The most recently saved table
    pub async fn last_saved(&self) -> Option<ResponseTable> {
        self.saved.read().await.last().cloned()
    }

    /// Number of times `save` was called
    pub async fn save_count(&self) -> usize {
        self.saved.read().await.len()
    }
}

#[async_trait]
impl ResponseTableReader for InMemoryResponseTable {
    async fn load(&self) -> Result<ResponseTable, TableError> {
        self.source
            .read()
            .await
            .clone()
            .ok_or_else(|| TableError::NotFound("in-memory table".to_string()))
    }
}

#[async_trait]
impl ResponseTableWriter for InMemoryResponseTable {
    async fn save(&self, table: &ResponseTable) -> Result<(), TableError> {
        self.saved.write().await.push(table.clone());
        Ok(())
    }
}
