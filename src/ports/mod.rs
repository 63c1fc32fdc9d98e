//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ResponseTableReader` / `ResponseTableWriter` - survey table I/O
//! - `ReportWriter` - screening report persistence

mod report_writer;
mod response_table;

pub use report_writer::{ReportError, ReportWriter};
pub use response_table::{ResponseTableReader, ResponseTableWriter, TableError};
