//! Adapters - Implementations of port interfaces.
//!
//! - `table` - CSV and in-memory response tables
//! - `report` - YAML screening report files

pub mod report;
pub mod table;

pub use report::FileReportWriter;
pub use table::{CsvOptions, CsvResponseTable, InMemoryResponseTable};
